//! Spam types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

use super::rules::SignalRule;

/// Classification verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Score reached the threshold
    Spam,
    /// Score stayed below the threshold
    NotSpam,
    /// Empty or whitespace-only input; nothing was scored
    Invalid,
}

impl Verdict {
    /// Inclusive threshold decision for a scored message
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score >= threshold {
            Verdict::Spam
        } else {
            Verdict::NotSpam
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Spam => "SPAM",
            Verdict::NotSpam => "NOT_SPAM",
            Verdict::Invalid => "INVALID",
        }
    }

    pub fn is_spam(&self) -> bool {
        *self == Verdict::Spam
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-message analysis record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Aggregate score, rounded to two decimals
    pub spam_score: f64,
    /// Threshold the score was compared against
    pub threshold: f64,
    /// Occurrences of all spam keywords
    pub keyword_count: usize,
    /// First matched keywords in keyword-list order
    pub found_keywords: Vec<String>,
    /// Matches of all URL patterns together
    pub url_count: usize,
    pub excessive_capitals: bool,
    /// Number of `!` characters in the raw text
    pub exclamation_marks: usize,
    pub repeated_special_chars: bool,
    pub repeated_keywords: bool,
}

/// Score contributed by one signal rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub rule: SignalRule,
    /// Contribution after capping
    pub score: f64,
}

/// Result of classifying one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub verdict: Verdict,
    /// Analysis record; `None` for invalid input
    pub analysis: Option<Analysis>,
    /// Rules with a non-zero contribution, in aggregation order
    pub contributions: Vec<RuleContribution>,
}

impl Classification {
    pub(crate) fn invalid() -> Self {
        Self {
            verdict: Verdict::Invalid,
            analysis: None,
            contributions: Vec::new(),
        }
    }

    /// Reported score; 0 for invalid input
    pub fn score(&self) -> f64 {
        self.analysis.as_ref().map_or(0.0, |a| a.spam_score)
    }

    pub fn is_spam(&self) -> bool {
        self.verdict.is_spam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(Verdict::from_score(3.0, 3.0), Verdict::Spam);
        assert_eq!(Verdict::from_score(2.99, 3.0), Verdict::NotSpam);
        assert_eq!(Verdict::from_score(0.0, 0.0), Verdict::Spam);
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::Spam.to_string(), "SPAM");
        assert_eq!(Verdict::NotSpam.to_string(), "NOT_SPAM");
        assert_eq!(Verdict::Invalid.to_string(), "INVALID");
        assert_eq!(serde_json::to_string(&Verdict::NotSpam).unwrap(), "\"NOT_SPAM\"");
    }

    #[test]
    fn test_analysis_keys() {
        let analysis = Analysis {
            spam_score: 1.5,
            threshold: 3.0,
            keyword_count: 1,
            found_keywords: vec!["free".to_string()],
            url_count: 2,
            excessive_capitals: false,
            exclamation_marks: 0,
            repeated_special_chars: false,
            repeated_keywords: false,
        };

        let value = serde_json::to_value(&analysis).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "excessive_capitals",
                "exclamation_marks",
                "found_keywords",
                "keyword_count",
                "repeated_keywords",
                "repeated_special_chars",
                "spam_score",
                "threshold",
                "url_count",
            ]
        );
    }

    #[test]
    fn test_invalid_classification() {
        let c = Classification::invalid();
        assert_eq!(c.verdict, Verdict::Invalid);
        assert_eq!(c.score(), 0.0);
        assert!(!c.is_spam());
    }
}
