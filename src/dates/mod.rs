//! Date-token parsing and validation.
//!
//! - accepted layouts and the matcher (`rules`)
//! - two-pass parsing plus calendar/mission-window checks (`interpreter`)

pub mod interpreter;
pub mod rules;

pub use interpreter::*;
pub use rules::{FORMAT_RULES, FormatRule};
