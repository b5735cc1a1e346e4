//! Error types for calert.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading events, evaluating rules or writing alerts.
#[derive(Error, Debug)]
pub enum CalertError {
    #[error("Couldn't read {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{format} decoding has failed: {reason}")]
    DecodeFailure { format: &'static str, reason: String },

    #[error("Couldn't write alerts to {}: {source}", .path.display())]
    SinkUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid value '{value}' for rule '{name}': {reason}")]
    InvalidRule {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Stable discriminant of a [`CalertError`], handy for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnreadable,
    DecodeFailure,
    SinkUnwritable,
    InvalidSelection,
    InvalidRule,
    Settings,
}

impl CalertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalertError::SourceUnreadable { .. } => ErrorKind::SourceUnreadable,
            CalertError::DecodeFailure { .. } => ErrorKind::DecodeFailure,
            CalertError::SinkUnwritable { .. } => ErrorKind::SinkUnwritable,
            CalertError::InvalidSelection(_) => ErrorKind::InvalidSelection,
            CalertError::InvalidRule { .. } => ErrorKind::InvalidRule,
            CalertError::Settings(_) => ErrorKind::Settings,
        }
    }

    pub(crate) fn decode(format: &'static str, reason: impl Into<String>) -> Self {
        CalertError::DecodeFailure {
            format,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::SourceUnreadable => "source_unreadable",
            ErrorKind::DecodeFailure => "decode_failure",
            ErrorKind::SinkUnwritable => "sink_unwritable",
            ErrorKind::InvalidSelection => "invalid_selection",
            ErrorKind::InvalidRule => "invalid_rule",
            ErrorKind::Settings => "settings",
        };
        f.write_str(name)
    }
}

/// Result type alias for calert operations.
pub type CalertResult<T> = Result<T, CalertError>;
