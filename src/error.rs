//! Error types for the identigram library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`IdentigramError`] enum.
//!
//! # Examples
//!
//! ```
//! use identigram::error::{IdentigramError, Result};
//!
//! fn build() -> Result<()> {
//!     Err(IdentigramError::config("minGramSize must be at least 1"))
//! }
//!
//! match build() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for identigram operations.
///
/// Configuration problems are reported when a component is constructed.
/// Errors raised by an upstream token stream are passed through unchanged.
#[derive(Error, Debug)]
pub enum IdentigramError {
    /// I/O errors (reading input text or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis errors raised while reading a token stream
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid component configuration (unknown options, bad gram sizes, ...)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with IdentigramError.
pub type Result<T> = std::result::Result<T, IdentigramError>;

impl IdentigramError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        IdentigramError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        IdentigramError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        IdentigramError::Other(msg.into())
    }

    /// Returns true if this error was raised while configuring a component.
    pub fn is_config(&self) -> bool {
        matches!(self, IdentigramError::Config(_))
    }
}
