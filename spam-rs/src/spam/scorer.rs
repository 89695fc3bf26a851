//! Spam scoring engine
//!
//! Runs the signal rules over a message, adds up their capped contributions
//! and compares the total with the configured threshold.

use tracing::{debug, trace};

use super::keywords::{KeywordMatcher, KeywordMatches};
use super::normalize::{is_blank, normalize};
use super::rules::{SignalRule, Signals};
use super::types::*;
use crate::config::DetectorConfig;
use crate::error::Result;

/// Rule-based spam detector.
///
/// Holds only read-only configuration and compiled patterns, so one detector
/// can be shared between threads and reused for any number of messages.
#[derive(Debug, Clone)]
pub struct SpamDetector {
    config: DetectorConfig,
    matcher: KeywordMatcher,
}

impl SpamDetector {
    /// Create a detector from a validated configuration
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        let matcher = KeywordMatcher::new(&config.keywords)?;
        debug!(
            "Spam detector ready with {} keywords, threshold {}",
            matcher.len(),
            config.threshold
        );
        Ok(Self { config, matcher })
    }

    /// Detector with the built-in keyword list and thresholds
    pub fn with_defaults() -> Result<Self> {
        Self::new(DetectorConfig::default())
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Configured keyword phrases in order
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.matcher.keywords()
    }

    /// Keyword matches of a raw message, counted on its normalized form
    pub fn count_keywords(&self, text: &str) -> KeywordMatches {
        self.matcher.find(&normalize(text))
    }

    /// Measurements every rule works from
    pub fn signals(&self, text: &str) -> Signals {
        Signals::measure(text, &self.count_keywords(text))
    }

    /// Contribution of every rule, in aggregation order
    pub fn contributions(&self, text: &str) -> Vec<RuleContribution> {
        self.rule_scores(&self.signals(text))
    }

    /// Aggregate score rounded to two decimals
    pub fn score(&self, text: &str) -> f64 {
        aggregate(&self.contributions(text))
    }

    /// Classify one message.
    ///
    /// Empty or whitespace-only text is [`Verdict::Invalid`] and is not
    /// scored. Anything else gets a score, an inclusive threshold decision and
    /// the full analysis record.
    pub fn classify(&self, text: &str) -> Classification {
        if is_blank(text) {
            debug!("Empty message, nothing to classify");
            return Classification::invalid();
        }

        let keywords = self.count_keywords(text);
        let signals = Signals::measure(text, &keywords);
        let contributions = self.rule_scores(&signals);
        let spam_score = aggregate(&contributions);
        let verdict = Verdict::from_score(spam_score, self.config.threshold);

        let rules = &self.config.rules;
        let analysis = Analysis {
            spam_score,
            threshold: self.config.threshold,
            keyword_count: keywords.total,
            found_keywords: keywords
                .found()
                .take(self.config.max_reported_keywords)
                .map(String::from)
                .collect(),
            url_count: signals.url_count,
            excessive_capitals: signals.excessive_capitals(rules),
            exclamation_marks: signals.exclamation_marks,
            repeated_special_chars: signals.repeated_special_chars(rules),
            repeated_keywords: signals.repeated_keywords(rules),
        };

        debug!(
            verdict = %verdict,
            score = spam_score,
            keywords = keywords.total,
            urls = signals.url_count,
            "Classified message"
        );

        Classification {
            verdict,
            analysis: Some(analysis),
            contributions: contributions.into_iter().filter(|c| c.score > 0.0).collect(),
        }
    }

    fn rule_scores(&self, signals: &Signals) -> Vec<RuleContribution> {
        SignalRule::ALL
            .iter()
            .map(|&rule| {
                let score = signals.contribution(rule, &self.config.rules);
                trace!("{}: {}", rule, score);
                RuleContribution { rule, score }
            })
            .collect()
    }
}

/// Sum of rule contributions, rounded to two decimals
pub fn aggregate(contributions: &[RuleContribution]) -> f64 {
    let total: f64 = contributions.iter().map(|c| c.score).sum();
    (total * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector(keywords: &[&str]) -> SpamDetector {
        SpamDetector::new(DetectorConfig::with_keywords(keywords.iter().copied())).unwrap()
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let d = SpamDetector::with_defaults().unwrap();
        for text in ["", " ", "\n\t  \r\n", "\x1f", "\x1c \x1d"] {
            let c = d.classify(text);
            assert_eq!(c.verdict, Verdict::Invalid);
            assert_eq!(c.score(), 0.0);
            assert!(c.analysis.is_none());
            assert!(c.contributions.is_empty());
        }
    }

    #[test]
    fn test_score_exactly_at_threshold_is_spam() {
        // six distinct keywords: 6 * 0.5 = 3.0, nothing else fires
        let d = SpamDetector::with_defaults().unwrap();
        let text = "free win offer prize urgent money";
        assert_eq!(d.score(text), 3.0);
        assert_eq!(d.classify(text).verdict, Verdict::Spam);
    }

    #[test]
    fn test_score_below_threshold_is_not_spam() {
        let d = SpamDetector::new(DetectorConfig::with_threshold(3.01)).unwrap();
        let c = d.classify("free win offer prize urgent money");
        assert_eq!(c.score(), 3.0);
        assert_eq!(c.verdict, Verdict::NotSpam);
    }

    #[test]
    fn test_keyword_volume_cap() {
        let keywords: Vec<String> = (0..20).map(|i| format!("spamword{}", i)).collect();
        let d = SpamDetector::new(DetectorConfig::with_keywords(keywords.clone())).unwrap();
        let text = keywords.join(" ");

        let contributions = d.contributions(&text);
        assert_eq!(contributions[0].rule, SignalRule::KeywordVolume);
        assert_eq!(contributions[0].score, 3.0);
        assert_eq!(d.classify(&text).analysis.unwrap().keyword_count, 20);
    }

    #[test]
    fn test_found_keywords_truncated() {
        let keywords: Vec<String> = (0..15).map(|i| format!("kw{}", i)).collect();
        let d = SpamDetector::new(DetectorConfig::with_keywords(keywords.clone())).unwrap();

        let analysis = d.classify(&keywords.join(" ")).analysis.unwrap();
        assert_eq!(analysis.keyword_count, 15);
        assert_eq!(analysis.found_keywords, keywords[..10].to_vec());
    }

    #[test]
    fn test_reduced_keyword_set() {
        let d = detector(&["cash"]);
        assert_eq!(d.count_keywords("Cashier desk").total, 0);
        assert_eq!(d.count_keywords("CASH now!").total, 1);
        assert_eq!(d.count_keywords("free money").total, 0);
    }

    #[test]
    fn test_contributions_only_lists_firing_rules() {
        let d = detector(&["free"]);
        let c = d.classify("free!!!");
        let rules: Vec<_> = c.contributions.iter().map(|c| c.rule).collect();
        assert_eq!(
            rules,
            vec![
                SignalRule::KeywordVolume,
                SignalRule::ExclamationDensity,
                SignalRule::RepeatedSpecialChars,
            ]
        );
        assert_eq!(c.score(), 2.5);
    }

    #[test]
    fn test_combining_marks_do_not_dilute_capitals() {
        let d = SpamDetector::with_defaults().unwrap();
        let c = d.classify("ABC defg हिंदी");
        assert!(c.analysis.as_ref().unwrap().excessive_capitals);
        assert_eq!(c.score(), 1.0);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let d = SpamDetector::with_defaults().unwrap();
        let text = "WIN a FREE prize!!! visit www.win-now.biz";
        assert_eq!(d.classify(text), d.classify(text));
    }

    #[test]
    fn test_detector_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpamDetector>();

        let d = SpamDetector::with_defaults().unwrap();
        let texts = ["free cash now", "Meeting at 10", "URGENT!!! CLICK HERE"];
        let expected: Vec<_> = texts.iter().map(|t| d.classify(t)).collect();

        std::thread::scope(|s| {
            let handles: Vec<_> = texts
                .iter()
                .map(|t| {
                    let d = &d;
                    s.spawn(move || d.classify(t))
                })
                .collect();
            for (handle, expected) in handles.into_iter().zip(expected) {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = SpamDetector::new(DetectorConfig::with_keywords(["free", "FREE"])).unwrap_err();
        assert!(err.to_string().contains("Duplicate keyword"));
    }
}
