//! Purpose: Centralize the summary output format.
//! Exports: `SUMMARY_INDENT`, `render_pretty`.
//! Role: Shared policy for how summaries are serialized on stdout.
//! Invariants: Pretty output uses a 4-space indent and preserves key order.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::core::error::{Error, ErrorKind};

pub const SUMMARY_INDENT: &str = "    ";

pub fn render_pretty(value: &Value) -> Result<String, Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(SUMMARY_INDENT.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode summary json")
            .with_source(err)
    })?;
    // PrettyFormatter only emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
