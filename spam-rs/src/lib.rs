//! spam-rs: Rule-based email spam classifier
//!
//! Scores a block of email text with a fixed set of heuristics and compares
//! the score with a threshold. There is no model and no training data: the
//! keyword list and every limit are static configuration.
//!
//! # Features
//!
//! - **Keyword matching**: whole-word, case-insensitive phrase counting
//! - **Signal rules**: URLs, capitals, exclamation marks, repeated special
//!   characters, repeated keywords, ALL-CAPS words and digit runs
//! - **Capped scoring**: unbounded counts cannot dominate the score
//! - **Analysis record**: every signal behind a verdict is reported
//!
//! # Example
//!
//! ```
//! use spam_rs::spam::{SpamDetector, Verdict};
//!
//! let detector = SpamDetector::with_defaults()?;
//!
//! let result = detector.classify("URGENT!!! Claim your FREE prize NOW: http://win.example.com");
//! assert_eq!(result.verdict, Verdict::Spam);
//!
//! let result = detector.classify("Lunch at noon tomorrow?");
//! assert_eq!(result.verdict, Verdict::NotSpam);
//! # Ok::<(), spam_rs::SpamError>(())
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`loader`]: Reading email text from files and stdin
//! - [`report`]: Human-readable output
//! - [`spam`]: The scoring engine

pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod spam;

// Re-export commonly used types
pub use config::{Config, DetectorConfig};
pub use error::{Result, SpamError};
pub use spam::{Analysis, Classification, SpamDetector, Verdict};
