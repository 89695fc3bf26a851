//! Configuration for spam-rs
//!
//! The detector is driven entirely by static configuration: the keyword list,
//! the spam threshold and the weights and limits of each signal rule. Every
//! field falls back to the named constant below, so a TOML file only has to
//! mention what it changes.
//!
//! ```toml
//! [detector]
//! threshold = 4.0
//! keywords = ["free", "click here", "act now"]
//!
//! [detector.rules]
//! capital_ratio_limit = 0.5
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, SpamError};
use crate::spam::keywords::canonical_keyword;

/// Score at or above which a message is spam
pub const DEFAULT_THRESHOLD: f64 = 3.0;
/// Number of matched keywords reported in an analysis
pub const MAX_REPORTED_KEYWORDS: usize = 10;

/// Score added per keyword occurrence
pub const KEYWORD_WEIGHT: f64 = 0.5;
/// Upper bound of the keyword volume contribution
pub const KEYWORD_SCORE_CAP: f64 = 3.0;
/// Score added per URL pattern match
pub const URL_WEIGHT: f64 = 0.5;
/// Upper bound of the URL contribution
pub const URL_SCORE_CAP: f64 = 2.0;
/// Uppercase share of all letters above which capitals are excessive
pub const CAPITAL_RATIO_LIMIT: f64 = 0.30;
/// Exclamation marks tolerated before the rule fires
pub const EXCLAMATION_LIMIT: usize = 2;
/// Shortest run of one special character that counts as repeated
pub const SPECIAL_RUN_LENGTH: usize = 3;
/// Occurrences of a single keyword that count as repetition
pub const REPEATED_KEYWORD_MIN: usize = 3;
/// Minimum length of an ALL-CAPS word
pub const CAPS_WORD_MIN_LEN: usize = 4;
/// ALL-CAPS words tolerated before the structural rule fires
pub const CAPS_WORD_LIMIT: usize = 2;
pub const CAPS_WORD_SCORE: f64 = 1.0;
/// Digit runs tolerated before the structural rule fires
pub const DIGIT_RUN_LIMIT: usize = 5;
pub const DIGIT_RUN_SCORE: f64 = 0.5;

/// Built-in spam phrases, in reporting order
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "free",
    "win",
    "offer",
    "prize",
    "click here",
    "urgent",
    "money",
    "winner",
    "congratulations",
    "limited time",
    "act now",
    "buy now",
    "discount",
    "save",
    "deal",
    "special offer",
    "guaranteed",
    "risk free",
    "no obligation",
    "cash",
    "bonus",
    "reward",
    "claim",
    "selected",
    "exclusive",
    "amazing",
    "incredible",
    "miracle",
    "secret",
    "hidden",
    "revealed",
    "instant",
    "as seen on",
    "order now",
    "call now",
    "click below",
    "unsubscribe",
    "remove",
    "opt out",
    "viagra",
    "pills",
    "pharmacy",
    "loan",
    "credit",
    "debt",
    "refinance",
];

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Scoring engine configuration
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scoring engine configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DetectorConfig {
    /// Inclusive spam threshold
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Spam phrases, matched case-insensitively on word boundaries
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// How many matched keywords an analysis reports
    #[serde(default = "default_max_reported_keywords")]
    pub max_reported_keywords: usize,
    /// Signal rule weights and limits
    #[serde(default)]
    pub rules: RuleConfig,
}

/// Weights and limits of the signal rules
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleConfig {
    pub keyword_weight: f64,
    pub keyword_cap: f64,
    pub url_weight: f64,
    pub url_cap: f64,
    pub capital_ratio_limit: f64,
    pub exclamation_limit: usize,
    pub special_run_length: usize,
    pub repeated_keyword_min: usize,
    pub caps_word_limit: usize,
    pub caps_word_score: f64,
    pub digit_run_limit: usize,
    pub digit_run_score: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_max_reported_keywords() -> usize {
    MAX_REPORTED_KEYWORDS
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load and validate configuration from a TOML file.
    ///
    /// Emits no log events; the caller logs the load once its subscriber is
    /// installed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SpamError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| SpamError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.detector.validate()
    }
}

impl DetectorConfig {
    /// Default configuration with a replacement keyword list
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Default configuration with a different threshold
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Check keyword list invariants and numeric ranges
    pub fn validate(&self) -> Result<()> {
        check_non_negative("threshold", self.threshold)?;

        let mut seen = HashSet::new();
        for keyword in &self.keywords {
            let key = canonical_keyword(keyword).to_lowercase();
            if key.is_empty() {
                return Err(SpamError::Config("Empty keyword in keyword list".to_string()));
            }
            if !seen.insert(key) {
                return Err(SpamError::Config(format!("Duplicate keyword '{}'", keyword)));
            }
        }

        self.rules.validate()
    }
}

impl RuleConfig {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("keyword_weight", self.keyword_weight)?;
        check_non_negative("keyword_cap", self.keyword_cap)?;
        check_non_negative("url_weight", self.url_weight)?;
        check_non_negative("url_cap", self.url_cap)?;
        check_non_negative("caps_word_score", self.caps_word_score)?;
        check_non_negative("digit_run_score", self.digit_run_score)?;

        if !(0.0..=1.0).contains(&self.capital_ratio_limit) {
            return Err(SpamError::Config(format!(
                "capital_ratio_limit must be between 0 and 1, got {}",
                self.capital_ratio_limit
            )));
        }

        if self.special_run_length < 2 {
            return Err(SpamError::Config(format!(
                "special_run_length must be at least 2, got {}",
                self.special_run_length
            )));
        }

        Ok(())
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SpamError::Config(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            keywords: default_keywords(),
            max_reported_keywords: MAX_REPORTED_KEYWORDS,
            rules: RuleConfig::default(),
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            keyword_weight: KEYWORD_WEIGHT,
            keyword_cap: KEYWORD_SCORE_CAP,
            url_weight: URL_WEIGHT,
            url_cap: URL_SCORE_CAP,
            capital_ratio_limit: CAPITAL_RATIO_LIMIT,
            exclamation_limit: EXCLAMATION_LIMIT,
            special_run_length: SPECIAL_RUN_LENGTH,
            repeated_keyword_min: REPEATED_KEYWORD_MIN,
            caps_word_limit: CAPS_WORD_LIMIT,
            caps_word_score: CAPS_WORD_SCORE,
            digit_run_limit: DIGIT_RUN_LIMIT,
            digit_run_score: DIGIT_RUN_SCORE,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
