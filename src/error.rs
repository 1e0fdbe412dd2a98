//! Error handling for the StreamVis core
//!
//! This module defines custom error types and a Result alias for use
//! throughout the crate.

use thiserror::Error;

/// Main error type for StreamVis operations
#[derive(Error, Debug)]
pub enum StreamVisError {
    /// Errors related to connection/project configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to frame payload decoding
    #[error("Decode error: {0}")]
    Decode(String),

    /// The accumulation buffer exceeded its configured maximum
    #[error("Frame buffer overflow: {buffered} bytes accumulated without a delimiter (limit {limit})")]
    BufferOverflow { buffered: usize, limit: usize },

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

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
        source: Box<StreamVisError>,
    },
}

impl StreamVisError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        StreamVisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for StreamVis operations
pub type Result<T> = std::result::Result<T, StreamVisError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StreamVisError::Decode("odd number of hex digits".to_string());
        assert_eq!(err.to_string(), "Decode error: odd number of hex digits");
    }

    #[test]
    fn test_error_with_context() {
        let err = StreamVisError::Config("empty end delimiter".to_string());
        let with_ctx = err.with_context("Failed to open connection");
        assert!(with_ctx.to_string().contains("Failed to open connection"));
    }

    #[test]
    fn test_overflow_error_fields() {
        let err = StreamVisError::BufferOverflow {
            buffered: 2048,
            limit: 1024,
        };
        assert!(err.to_string().contains("2048"));
        assert!(err.to_string().contains("1024"));
    }
}
