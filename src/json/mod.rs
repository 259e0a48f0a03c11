//! Purpose: Internal JSON parsing boundary shared by report loading.
//! Exports: `parse` module with decode and failure-categorization helpers.
//! Role: Single seam for parser usage so callsites avoid ad hoc decode logic.
//! Invariants: Report decoding goes through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
