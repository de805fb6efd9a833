//! Run reporting.

pub mod format;

pub use format::{format_summary, log_summary};
