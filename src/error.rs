//! Error types for the channelspell library.
//!
//! Inference itself never fails: impossible alignments are scored as negative
//! infinity. Errors only come from the layers that touch the outside world,
//! such as corpus loading, model persistence, configuration and the CLI.
//!
//! # Examples
//!
//! ```
//! use channelspell::error::{ChannelSpellError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ChannelSpellError::invalid_argument("limit must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for channelspell operations.
#[derive(Error, Debug)]
pub enum ChannelSpellError {
    /// I/O errors (corpus files, model files, stdin/stdout)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Training corpus errors
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Model construction or persistence errors
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Binary (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with ChannelSpellError.
pub type Result<T> = std::result::Result<T, ChannelSpellError>;

impl ChannelSpellError {
    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        ChannelSpellError::Corpus(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        ChannelSpellError::Model(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ChannelSpellError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ChannelSpellError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ChannelSpellError::Other(msg.into())
    }
}

impl From<bincode::Error> for ChannelSpellError {
    fn from(err: bincode::Error) -> Self {
        ChannelSpellError::Serialization(err.to_string())
    }
}
