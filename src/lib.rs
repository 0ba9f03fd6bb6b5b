//! `claim-odds` library crate.
//!
//! The binary (`claims`) is a thin wrapper around this library so that:
//!
//! - the scoring/table core is testable without a terminal
//! - front-ends (CLI, TUI) share one `Session` API
//! - the core has no dependency on any rendering or event loop

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod report;
pub mod store;
pub mod tui;
