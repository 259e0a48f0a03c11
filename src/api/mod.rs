//! Purpose: Define the public Rust API boundary for timestats.
//! Exports: Report loading, key search, summary building, output rendering, errors.
//! Role: Public surface used by the CLI and tests; hides internal parse helpers.
//! Invariants: This module is the only public path to the core modules' items.

mod report;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::find::{find_key, find_key_skipping_null};
pub use crate::core::format::{SUMMARY_INDENT, render_pretty};
pub use crate::core::summary::{
    DEFAULT_METRIC, DEFAULT_VARIANTS, NullPolicy, SummaryOptions, metric_key, summarize,
};
pub use report::{load_report, parse_report};
