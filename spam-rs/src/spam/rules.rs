//! Signal rules
//!
//! Each rule looks at either the raw message or the keyword matches of the
//! normalized message and yields a non-negative contribution. Measurements are
//! taken once into [`Signals`]; [`Signals::contribution`] turns them into
//! scores under a [`RuleConfig`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::keywords::KeywordMatches;
use crate::config::{RuleConfig, CAPS_WORD_MIN_LEN};

/// Top-level domains counted by the bare-domain URL pattern
pub const SUSPICIOUS_TLDS: &[&str] = &[
    "com", "net", "org", "info", "biz", "ru", "tk", "ml", "ga", "cf", "gq", "xyz", "click",
    "download", "link",
];

/// Characters whose runs count as repeated special characters
pub const SPECIAL_CHARS: &[char] = &['!', '?', '*', '#', '$', '%', '&'];

static URL_SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\\(\\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+",
    )
    .expect("Invalid URL scheme regex")
});

static URL_WWW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)www\.[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid www regex")
});

static URL_BARE_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)[a-zA-Z0-9.-]+\.(?:{})",
        SUSPICIOUS_TLDS.join("|")
    ))
    .expect("Invalid domain regex")
});

static CAPS_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b[A-Z]{{{},}}\b", CAPS_WORD_MIN_LEN)).expect("Invalid caps regex")
});

static LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}").expect("Invalid letter regex"));

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("Invalid digit regex"));

/// The seven independent detectors, in aggregation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalRule {
    KeywordVolume,
    SuspiciousUrls,
    ExcessiveCapitals,
    ExclamationDensity,
    RepeatedSpecialChars,
    RepeatedKeywords,
    Structure,
}

impl SignalRule {
    pub const ALL: [SignalRule; 7] = [
        SignalRule::KeywordVolume,
        SignalRule::SuspiciousUrls,
        SignalRule::ExcessiveCapitals,
        SignalRule::ExclamationDensity,
        SignalRule::RepeatedSpecialChars,
        SignalRule::RepeatedKeywords,
        SignalRule::Structure,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SignalRule::KeywordVolume => "KEYWORD_VOLUME",
            SignalRule::SuspiciousUrls => "SUSPICIOUS_URLS",
            SignalRule::ExcessiveCapitals => "EXCESSIVE_CAPITALS",
            SignalRule::ExclamationDensity => "EXCLAMATION_DENSITY",
            SignalRule::RepeatedSpecialChars => "REPEATED_SPECIAL_CHARS",
            SignalRule::RepeatedKeywords => "REPEATED_KEYWORDS",
            SignalRule::Structure => "STRUCTURE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SignalRule::KeywordVolume => "Spam keywords present",
            SignalRule::SuspiciousUrls => "Links or bare domains present",
            SignalRule::ExcessiveCapitals => "Too many capital letters",
            SignalRule::ExclamationDensity => "Too many exclamation marks",
            SignalRule::RepeatedSpecialChars => "Runs of repeated special characters",
            SignalRule::RepeatedKeywords => "A spam keyword is repeated",
            SignalRule::Structure => "ALL-CAPS words or many numbers",
        }
    }
}

impl fmt::Display for SignalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Raw measurements of one message
#[derive(Debug, Clone, PartialEq)]
pub struct Signals {
    pub keyword_count: usize,
    pub max_keyword_repeats: usize,
    pub url_count: usize,
    pub capital_ratio: Option<f64>,
    pub exclamation_marks: usize,
    pub longest_special_run: usize,
    pub caps_words: usize,
    pub digit_runs: usize,
}

impl Signals {
    pub fn measure(raw: &str, keywords: &KeywordMatches) -> Self {
        Self {
            keyword_count: keywords.total,
            max_keyword_repeats: keywords.max_count(),
            url_count: count_urls(raw),
            capital_ratio: capital_ratio(raw),
            exclamation_marks: count_exclamations(raw),
            longest_special_run: longest_special_run(raw),
            caps_words: count_caps_words(raw),
            digit_runs: count_digit_runs(raw),
        }
    }

    pub fn excessive_capitals(&self, rules: &RuleConfig) -> bool {
        self.capital_ratio
            .is_some_and(|ratio| ratio > rules.capital_ratio_limit)
    }

    pub fn excessive_exclamations(&self, rules: &RuleConfig) -> bool {
        self.exclamation_marks > rules.exclamation_limit
    }

    pub fn repeated_special_chars(&self, rules: &RuleConfig) -> bool {
        self.longest_special_run >= rules.special_run_length
    }

    pub fn repeated_keywords(&self, rules: &RuleConfig) -> bool {
        self.max_keyword_repeats >= rules.repeated_keyword_min
    }

    /// Score of a single rule, caps applied
    pub fn contribution(&self, rule: SignalRule, rules: &RuleConfig) -> f64 {
        match rule {
            SignalRule::KeywordVolume => {
                capped(self.keyword_count, rules.keyword_weight, rules.keyword_cap)
            }
            SignalRule::SuspiciousUrls => capped(self.url_count, rules.url_weight, rules.url_cap),
            SignalRule::ExcessiveCapitals => flag(self.excessive_capitals(rules)),
            SignalRule::ExclamationDensity => flag(self.excessive_exclamations(rules)),
            SignalRule::RepeatedSpecialChars => flag(self.repeated_special_chars(rules)),
            SignalRule::RepeatedKeywords => flag(self.repeated_keywords(rules)),
            SignalRule::Structure => {
                let mut score = 0.0;
                if self.caps_words > rules.caps_word_limit {
                    score += rules.caps_word_score;
                }
                if self.digit_runs > rules.digit_run_limit {
                    score += rules.digit_run_score;
                }
                score
            }
        }
    }
}

fn capped(count: usize, weight: f64, cap: f64) -> f64 {
    (count as f64 * weight).min(cap)
}

fn flag(hit: bool) -> f64 {
    if hit {
        1.0
    } else {
        0.0
    }
}

/// Matches of the scheme, `www.` and bare-domain patterns added together.
///
/// One link can match more than one pattern: `http://www.example.com` counts
/// three times.
pub fn count_urls(text: &str) -> usize {
    [&*URL_SCHEME, &*URL_WWW, &*URL_BARE_DOMAIN]
        .iter()
        .map(|re| re.find_iter(text).count())
        .sum()
}

/// Share of uppercase characters among letters; `None` without letters.
///
/// Letters are the Unicode `L*` categories, so combining vowel signs of
/// scripts like Devanagari do not count. Uppercase is the Unicode
/// `Uppercase` property over the whole text.
pub fn capital_ratio(text: &str) -> Option<f64> {
    let letters = LETTER.find_iter(text).count();
    if letters == 0 {
        return None;
    }

    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    Some(upper as f64 / letters as f64)
}

pub fn count_exclamations(text: &str) -> usize {
    text.chars().filter(|&c| c == '!').count()
}

/// Longest run of one repeated character from [`SPECIAL_CHARS`]
pub fn longest_special_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut prev = None;

    for c in text.chars() {
        if SPECIAL_CHARS.contains(&c) {
            current = if prev == Some(c) { current + 1 } else { 1 };
            longest = longest.max(current);
        } else {
            current = 0;
        }
        prev = Some(c);
    }

    longest
}

/// Words of at least [`CAPS_WORD_MIN_LEN`] ASCII capitals
pub fn count_caps_words(text: &str) -> usize {
    CAPS_WORD.find_iter(text).count()
}

pub fn count_digit_runs(text: &str) -> usize {
    DIGIT_RUN.find_iter(text).count()
}
