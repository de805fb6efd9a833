//! Domain types shared by the pipeline and the report.
//!
//! - per-token results (`DateOutcome`)
//! - run counters (`RunSummary`)

pub mod types;

pub use types::*;
