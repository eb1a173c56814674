//! High-level operations.
//!
//! This module contains the implementation of wsalias commands.

pub mod check;
pub mod discover;

pub use check::{check_workspace, format_report, CheckReport, CheckResult};
pub use discover::{discover_workspace, DiscoverOptions};
