// Core modules implementing key search, summary building, output format, and error modeling.
pub mod error;
pub mod find;
pub mod format;
pub mod summary;
