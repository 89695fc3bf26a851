//! Spam scoring module
//!
//! Deterministic, rule-based spam detection: normalization, keyword matching,
//! seven signal rules and a threshold decision.

pub mod keywords;
pub mod normalize;
pub mod rules;
pub mod scorer;
pub mod types;

pub use keywords::{KeywordCount, KeywordMatcher, KeywordMatches};
pub use normalize::normalize;
pub use rules::{SignalRule, Signals};
pub use scorer::{aggregate, SpamDetector};
pub use types::*;
