//! Purpose: Library crate backing the `timestats` CLI and its tests.
//! Exports: `api` (report loading, key search, summary building, errors).
//! Role: Keeps the search and summary logic pure and testable apart from process I/O.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
//! Invariants: Only `load_report` touches the filesystem.
pub mod api;
mod core;
mod json;
