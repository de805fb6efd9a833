//! `rover-fetch` library crate.
//!
//! The binary is a thin wrapper around this library so that:
//!
//! - date parsing and downloading are testable without spawning processes
//! - the fetcher and date interpreter can be reused on their own

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dates;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod io;
pub mod logging;
pub mod report;

#[cfg(test)]
mod testing;
