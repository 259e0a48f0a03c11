// CLI integration tests for report summarization flows.
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};

const ALL_VARIANTS: [&str; 9] = [
    "Legacy",
    "Coo",
    "CooSort",
    "Coo_Gpu",
    "CooSort_Gpu",
    "Csr",
    "Csr_Gpu",
    "CsrNodeWise",
    "CsrBuildLess",
];

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_timestats");
    let mut cmd = Command::new(exe);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_report(dir: &Path, contents: &str) -> String {
    let path = dir.join("time_stats.json");
    std::fs::write(&path, contents).expect("write report");
    path.to_str().expect("utf8 path").to_string()
}

fn run_with_input(input: &str, extra: &[&str]) -> Output {
    cmd()
        .args(["--input", input, "--color", "never"])
        .args(extra)
        .output()
        .expect("run timestats")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout json")
}

fn stderr_error(output: &Output) -> Value {
    let text = String::from_utf8_lossy(&output.stderr);
    let line = text.lines().next().expect("stderr line");
    let value: Value = serde_json::from_str(line).expect("stderr json");
    value.get("error").cloned().expect("error object")
}

fn keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .expect("object")
        .keys()
        .cloned()
        .collect()
}

#[test]
fn single_variant_summary_is_pretty_printed_with_four_spaces() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = write_report(
        temp.path(),
        r#"{"AssembleBilinearOperator_Coo": {"Local": 1.2, "Cumulative": 3.4}}"#,
    );

    let output = run_with_input(&input, &["--variant", "Legacy", "--variant", "Coo"]);
    assert!(output.status.success());
    let expected = r#"{
    "Legacy": {},
    "Coo": {
        "AssembleBilinearOperator": {
            "Local": 1.2,
            "Cumulative": 3.4
        }
    }
}
"#;
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[test]
fn default_variants_keep_declared_order_for_partial_matches() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = write_report(
        temp.path(),
        r#"{
            "Listing": [
                "AssembleBilinearOperator_CsrBuildLess", {"Local": 0.9},
                {"Nested": {"AssembleBilinearOperator_Coo_Gpu": {"Local": 0.2}}}
            ],
            "AssembleBilinearOperator_Legacy": {"Local": 5.0}
        }"#,
    );

    let output = run_with_input(&input, &[]);
    assert!(output.status.success());
    let summary = stdout_json(&output);
    assert_eq!(keys(&summary), ALL_VARIANTS.to_vec());

    let found = ["Legacy", "Coo_Gpu", "CsrBuildLess"];
    for variant in ALL_VARIANTS {
        let entry = &summary[variant];
        if found.contains(&variant) {
            assert_eq!(keys(entry), vec!["AssembleBilinearOperator"]);
        } else {
            assert_eq!(entry, &json!({}), "variant {variant}");
        }
    }
    assert_eq!(
        summary["CsrBuildLess"]["AssembleBilinearOperator"],
        json!({"Local": 0.9})
    );
    assert_eq!(
        summary["Coo_Gpu"]["AssembleBilinearOperator"],
        json!({"Local": 0.2})
    );
}

#[test]
fn no_arguments_read_the_default_listing_path() {
    let temp = tempfile::tempdir().expect("tempdir");
    let listing = temp.path().join("output").join("listing");
    std::fs::create_dir_all(&listing).expect("mkdir");
    std::fs::write(
        listing.join("time_stats.json"),
        r#"{"AssembleBilinearOperator_Csr_Gpu": 0.125}"#,
    )
    .expect("write report");

    let output = cmd().current_dir(temp.path()).output().expect("run");
    assert!(output.status.success());
    let summary = stdout_json(&output);
    assert_eq!(keys(&summary), ALL_VARIANTS.to_vec());
    assert_eq!(
        summary["Csr_Gpu"],
        json!({"AssembleBilinearOperator": 0.125})
    );
}

#[test]
fn sub_metrics_and_null_policy_flags() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = write_report(
        temp.path(),
        r#"{
            "AssembleBilinearOperator_Csr": {
                "Local": 1.0,
                "BuildMatrix": {"Local": 0.5, "Cumulative": 0.6}
            },
            "AssembleBilinearOperator_Coo": null
        }"#,
    );

    let output = run_with_input(
        &input,
        &["--variant", "Csr", "--variant", "Coo", "--sub-metric", "BuildMatrix"],
    );
    assert!(output.status.success());
    let summary = stdout_json(&output);
    assert_eq!(
        summary["Csr"]["BuildMatrix"],
        json!({"Local": 0.5, "Cumulative": 0.6})
    );
    assert_eq!(summary["Coo"], json!({"AssembleBilinearOperator": null}));

    let output = run_with_input(&input, &["--variant", "Coo", "--null-as-missing"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!({"Coo": {}}));
}

#[test]
fn missing_report_exits_not_found_with_empty_stdout() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = temp.path().join("absent.json");

    let output = run_with_input(input.to_str().expect("utf8"), &[]);
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    let error = stderr_error(&output);
    assert_eq!(error["kind"], "NotFound");
    assert!(error["path"].as_str().expect("path").ends_with("absent.json"));
    assert!(error["hint"].as_str().expect("hint").contains("--input"));
}

#[test]
fn malformed_report_exits_parse_with_position() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = write_report(temp.path(), "{\n  \"AssembleBilinearOperator_Coo\": \n");

    let output = run_with_input(&input, &[]);
    assert_eq!(output.status.code(), Some(5));
    assert!(output.stdout.is_empty());
    let error = stderr_error(&output);
    assert_eq!(error["kind"], "Parse");
    assert!(error["line"].as_u64().is_some());
    assert!(
        error["hint"]
            .as_str()
            .expect("hint")
            .contains("parse category: truncated")
    );
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = cmd().arg("--bogus").output().expect("run");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let error = stderr_error(&output);
    assert_eq!(error["kind"], "Usage");
}

#[test]
fn directory_input_exits_io() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = run_with_input(temp.path().to_str().expect("utf8"), &[]);
    assert_eq!(output.status.code(), Some(6));
    assert!(output.stdout.is_empty());
    let error = stderr_error(&output);
    assert_eq!(error["kind"], "Io");
    assert!(error["hint"].as_str().expect("hint").contains("I/O error"));
}
