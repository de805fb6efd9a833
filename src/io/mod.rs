//! Input/output helpers.
//!
//! - date-list reading (`dates_file`)
//! - output layout and payload writes (`store`)

pub mod dates_file;
pub mod store;

pub use dates_file::*;
pub use store::*;
