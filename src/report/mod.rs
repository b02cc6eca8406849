//! Formatted terminal output for the batch front-end.

pub mod format;

pub use format::*;
