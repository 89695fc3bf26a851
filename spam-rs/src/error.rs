//! Error types for spam-rs

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for spam-rs operations
pub type Result<T> = std::result::Result<T, SpamError>;

/// Errors raised around the scoring core.
///
/// Scoring itself never fails: empty input is reported through
/// [`Verdict::Invalid`](crate::spam::Verdict::Invalid). These variants cover
/// loading email files, loading configuration and compiling keyword patterns.
#[derive(Error, Debug)]
pub enum SpamError {
    /// The email file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The email file is not valid UTF-8 text
    #[error("Could not decode {} as UTF-8 text: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A keyword could not be compiled into a matcher
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
