//! CLI support for qp8db
//!
//! The `qp8` binary is a thin clap front end over these functions, so the
//! same commands can be driven from tests or embedded in other tools.

mod check;
mod format;
mod scan;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use format::{FormatOptions, execute_format};
pub use scan::{ScanOptions, execute_scan};

use std::io;

use thiserror::Error;

use crate::SyntaxError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Pass a query or pipe one to stdin.")]
    NoInput,
}
