//! Error handling for the ChanVis application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application. Input validation and file import each get
//! their own typed error so the UI can report them next to the control
//! that produced them. Imports run on a reader thread and report
//! [`ImportError`] directly; it never passes through [`ChanVisError`].

use thiserror::Error;

/// Main error type for ChanVis operations
#[derive(Error, Debug)]
pub enum ChanVisError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected user input
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ChanVisError>,
    },
}

impl ChanVisError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ChanVisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// A configuration edit that was rejected at the input boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("interval must be a positive whole number of milliseconds, got {0:?}")]
    Interval(String),

    #[error("{field} must be a whole number, got {input:?}")]
    Bound { field: &'static str, input: String },

    #[error("minimum {min} is greater than maximum {max}")]
    InvertedRange { min: i64, max: i64 },

    #[error("vertical scale must be a positive number, got {0:?}")]
    Scale(String),

    #[error("channel count must be at least 1, got {0}")]
    ChannelCount(usize),
}

/// Reasons an imported channel data file was not accepted
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("expected an array of channel arrays, found {found}")]
    Shape { found: &'static str },

    #[error("channel {channel}, sample {index}: expected an integer, found {found}")]
    NotInteger {
        channel: usize,
        index: usize,
        found: String,
    },

    #[error("file contains no channels")]
    Empty,

    #[error("{0} is not a .json file")]
    UnsupportedFile(String),
}

/// Result type alias for ChanVis operations
pub type Result<T> = std::result::Result<T, ChanVisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChanVisError::Config("Invalid channel count".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid channel count");
    }

    #[test]
    fn test_error_with_context() {
        let err = ChanVisError::Serialization("test".to_string());
        let with_ctx = err.with_context("Failed to export");
        assert!(with_ctx.to_string().contains("Failed to export"));
    }

    #[test]
    fn test_inverted_range_message() {
        let err: ChanVisError = ValidationError::InvertedRange { min: 9, max: 2 }.into();
        assert!(err.to_string().contains("minimum 9 is greater than maximum 2"));
    }

    #[test]
    fn test_not_integer_message() {
        let err = ImportError::NotInteger {
            channel: 1,
            index: 4,
            found: "\"x\"".to_string(),
        };
        assert!(err.to_string().contains("channel 1, sample 4"));
    }
}
