//! Purpose: `timestats` CLI entry point.
//! Role: Binary crate root; parses args, loads the report, emits the summary JSON on stdout.
//! Invariants: Stdout carries only the pretty summary (4-space indent, declared variant order).
//! Invariants: Errors go to stderr (human text on a TTY, JSON otherwise); stdout stays empty.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Logs are written to stderr and never interleave with the summary.
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod color_json;

use color_json::colorize_json;
use timestats::api::{
    DEFAULT_METRIC, Error, ErrorKind, NullPolicy, SUMMARY_INDENT, SummaryOptions, load_report,
    render_pretty, summarize, to_exit_code,
};

const DEFAULT_INPUT: &str = "output/listing/time_stats.json";

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                return Ok(RunOutcome::with_code(0));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `timestats --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing(cli.verbose);
    let color_mode = cli.color;

    execute(cli)
        .map_err(add_io_hint)
        .map_err(add_internal_hint)
        .map_err(|err| (err, color_mode))
}

fn execute(cli: Cli) -> Result<RunOutcome, Error> {
    let options = cli.summary_options()?;
    debug!(
        input = %cli.input.display(),
        metric = %options.metric,
        variants = options.variants.len(),
        "summarizing report"
    );
    let report = load_report(&cli.input)?;
    let summary = summarize(&report, &options);
    emit_json(&Value::Object(summary), cli.color)?;
    Ok(RunOutcome::ok())
}

#[derive(Parser)]
#[command(
    name = "timestats",
    version,
    about = "Summarize bilinear-assembly timings per variant from a time_stats report",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Reads a nested benchmark report, finds `<metric>_<variant>` for each variant,
and prints one pretty JSON object keyed by variant, in declared order.

Keys are found in objects ({"key": value}) and in arrays as a "key" string
followed by its value (["key", value]). Missing variants print as {}.
"#,
    after_help = r#"EXAMPLES
  $ timestats
  $ timestats --input run-42/time_stats.json
  $ timestats --variant Csr --variant Csr_Gpu --sub-metric BuildMatrix
  $ timestats --metric AssembleLinearOperator --color never"#
)]
struct Cli {
    #[arg(
        long,
        default_value = DEFAULT_INPUT,
        value_hint = ValueHint::FilePath,
        help = "Report to read"
    )]
    input: PathBuf,
    #[arg(
        long = "variant",
        value_name = "NAME",
        help = "Variant to summarize (repeatable; default: all assembly variants)"
    )]
    variants: Vec<String>,
    #[arg(
        long,
        default_value = DEFAULT_METRIC,
        value_name = "NAME",
        help = "Metric prefix to look up; also the output field name"
    )]
    metric: String,
    #[arg(
        long = "sub-metric",
        value_name = "KEY",
        help = "Extra key to extract from inside each matched metric (repeatable)"
    )]
    sub_metrics: Vec<String>,
    #[arg(long, help = "Skip metrics bound to null while searching (legacy behaviour)")]
    null_as_missing: bool,
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize the summary and stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,
    #[arg(short, long, help = "Log lookups to stderr (RUST_LOG overrides)")]
    verbose: bool,
}

impl Cli {
    fn summary_options(&self) -> Result<SummaryOptions, Error> {
        if self.metric.is_empty() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("--metric must not be empty")
                .with_hint(format!("Omit --metric to use {DEFAULT_METRIC}.")));
        }
        let mut options = SummaryOptions::default()
            .with_metric(self.metric.clone())
            .with_sub_metrics(self.sub_metrics.iter().cloned());
        if !self.variants.is_empty() {
            options = options.with_variants(self.variants.iter().cloned());
        }
        if self.null_as_missing {
            options = options.with_null_policy(NullPolicy::Missing);
        }
        Ok(options)
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn add_io_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::NotFound => err.with_hint(format!(
            "Run the benchmark first, or pass --input <path> (default: {DEFAULT_INPUT})."
        )),
        ErrorKind::Permission => err.with_hint("Permission denied. Check the report file permissions."),
        ErrorKind::Io => err.with_hint("I/O error. Check the path and filesystem."),
        _ => err,
    }
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "Unexpected internal failure. Retry with RUST_BACKTRACE=1 and share command/context if it persists.",
    )
}

fn emit_json(value: &Value, color_mode: ColorMode) -> Result<(), Error> {
    let stdout = io::stdout();
    let use_color = color_mode.use_color(stdout.is_terminal());
    let json = if use_color {
        colorize_json(value, SUMMARY_INDENT, true)
    } else {
        render_pretty(value)?
    };
    let mut out = stdout.lock();
    writeln!(out, "{json}")
        .and_then(|()| out.flush())
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write summary")
                .with_source(err)
        })
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Permission => "permission denied".to_string(),
        ErrorKind::Parse => "invalid json".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(line) = err.line() {
        inner.insert("line".to_string(), json!(line));
    }
    if let Some(column) = err.column() {
        inner.insert("column".to_string(), json!(column));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        let location = match (err.line(), err.column()) {
            (Some(line), Some(column)) => format!("{}:{line}:{column}", path.display()),
            _ => path.display().to_string(),
        };
        lines.push(format!(
            "{} {location}",
            colorize_label("path:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
