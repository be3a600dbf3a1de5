//! Unified application error type.
//! Loading, configuration, export and CLI code return AppError. Club rule
//! violations are not errors: the simulator reports them as records.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Input log errors
    // ---------------------------
    #[error("Malformed line {number}: {line}")]
    InvalidLine { number: usize, line: String },

    #[error("Invalid day configuration: {0}")]
    InvalidDayConfig(String),

    #[error("Event log is empty")]
    EmptyLog,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// The raw input line when the error points at one, as printed by `run`/`check`.
    pub fn offending_line(&self) -> Option<&str> {
        match self {
            AppError::InvalidLine { line, .. } => Some(line),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
