// File: ./src/error.rs
//! Fatal error taxonomy of a report run.
//!
//! Every variant aborts the run: there is no partial-success mode, so the
//! binary just propagates these up to `main`.
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ReportError {
    /// The calendar file could not be opened or read.
    InputAccess { path: PathBuf, source: io::Error },
    /// The calendar stream is malformed.
    Decode(String),
    /// A recurrence field that must be numeric is not.
    RecurrenceField {
        title: String,
        field: &'static str,
        value: String,
    },
    /// The configuration file is unreadable or malformed.
    Config(String),
    /// Writing the report failed.
    Output(io::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::InputAccess { path, source } => {
                write!(f, "Cannot open calendar file {:?}: {}", path, source)
            }
            ReportError::Decode(msg) => write!(f, "Malformed calendar: {}", msg),
            ReportError::RecurrenceField {
                title,
                field,
                value,
            } => write!(
                f,
                "Invalid {} value {:?} in recurrence rule of {:?}",
                field, value, title
            ),
            ReportError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            ReportError::Output(e) => write!(f, "Failed to write report: {}", e),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::InputAccess { source, .. } => Some(source),
            ReportError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReportError {
    fn from(e: io::Error) -> Self {
        Self::Output(e)
    }
}
