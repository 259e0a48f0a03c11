//! Purpose: Load a benchmark time-stats report from disk into a JSON tree.
//! Exports: `load_report`, `parse_report`.
//! Role: I/O boundary for the CLI; everything past it is pure.
//! Invariants: The file is read in full before parsing; no partial results.
//! Invariants: Every failure carries the report path and a stable `ErrorKind`.

use std::io;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::core::error::{Error, ErrorKind};
use crate::json::parse;

const PARSE_CONTEXT: &str = "report.load";

pub fn load_report(path: &Path) -> Result<Value, Error> {
    let bytes = std::fs::read(path).map_err(|err| read_error(path, err))?;
    info!(path = %path.display(), bytes = bytes.len(), "read report");
    parse_report(&bytes, path)
}

pub fn parse_report(bytes: &[u8], path: &Path) -> Result<Value, Error> {
    parse::from_slice::<Value>(bytes).map_err(|err| {
        let hint = parse::hint_for_error(&err, PARSE_CONTEXT);
        Error::new(ErrorKind::Parse)
            .with_message("report is not valid json")
            .with_hint(hint)
            .with_path(path)
            .with_position(err.line(), err.column())
            .with_source(err)
    })
}

fn read_error(path: &Path, err: io::Error) -> Error {
    let (kind, message) = match err.kind() {
        io::ErrorKind::NotFound => (ErrorKind::NotFound, "report file not found"),
        io::ErrorKind::PermissionDenied => (ErrorKind::Permission, "report file is not readable"),
        _ => (ErrorKind::Io, "failed to read report file"),
    };
    Error::new(kind)
        .with_message(message)
        .with_path(path)
        .with_source(err)
}
