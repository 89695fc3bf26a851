//! Keyword matching on word boundaries

use regex::{Regex, RegexBuilder};

use super::normalize::collapse_whitespace;
use crate::error::Result;

/// Phrase as it is matched: surrounding whitespace trimmed and inner runs
/// collapsed to one space, the same shape normalized text has.
pub fn canonical_keyword(keyword: &str) -> String {
    collapse_whitespace(keyword)
}

/// Occurrences of one keyword in a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Result of matching the keyword list against one message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordMatches {
    /// Occurrences of all keywords together
    pub total: usize,
    /// Keywords that matched at least once, in keyword-list order
    pub counts: Vec<KeywordCount>,
}

impl KeywordMatches {
    /// Matched keywords in keyword-list order
    pub fn found(&self) -> impl Iterator<Item = &str> {
        self.counts.iter().map(|c| c.keyword.as_str())
    }

    /// Highest occurrence count of any single keyword
    pub fn max_count(&self) -> usize {
        self.counts.iter().map(|c| c.count).max().unwrap_or(0)
    }

    /// Occurrences of a given keyword (0 when it did not match)
    pub fn count_of(&self, keyword: &str) -> usize {
        self.counts
            .iter()
            .find(|c| c.keyword.eq_ignore_ascii_case(keyword))
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

/// Compiled keyword list.
///
/// Each phrase only matches as a whole word or phrase: "cash" never matches
/// inside "cashier", and "click here" needs exactly that space-separated
/// sequence. Matching ignores case whatever the input looks like.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    patterns: Vec<(String, Regex)>,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let patterns = keywords
            .iter()
            .map(|keyword| -> Result<(String, Regex)> {
                let keyword = canonical_keyword(keyword.as_ref());
                let re = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&keyword)))
                    .case_insensitive(true)
                    .build()?;
                Ok((keyword, re))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Count every keyword occurrence in `text`
    pub fn find(&self, text: &str) -> KeywordMatches {
        let mut matches = KeywordMatches::default();

        for (keyword, re) in &self.patterns {
            let count = re.find_iter(text).count();
            if count > 0 {
                matches.total += count;
                matches.counts.push(KeywordCount {
                    keyword: keyword.clone(),
                    count,
                });
            }
        }

        matches
    }

    /// Configured phrases in order
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(keywords: &[&str]) -> KeywordMatcher {
        KeywordMatcher::new(keywords).unwrap()
    }

    #[test]
    fn test_word_boundary() {
        let m = matcher(&["cash"]);
        assert_eq!(m.find("cashier").total, 0);
        assert_eq!(m.find("petty cashier desk").total, 0);
        assert_eq!(m.find("cash now").total, 1);
        assert_eq!(m.find("cash now").count_of("cash"), 1);
    }

    #[test]
    fn test_counts_every_occurrence() {
        let m = matcher(&["free", "money"]);
        let found = m.find("free money free gift free");
        assert_eq!(found.total, 4);
        assert_eq!(found.count_of("free"), 3);
        assert_eq!(found.count_of("money"), 1);
        assert_eq!(found.max_count(), 3);
    }

    #[test]
    fn test_phrase_needs_exact_sequence() {
        let m = matcher(&["click here"]);
        assert_eq!(m.find("click here now").total, 1);
        assert_eq!(m.find("click  here").total, 0);
        assert_eq!(m.find("click over here").total, 0);
        assert_eq!(m.find("clickhere").total, 0);
    }

    #[test]
    fn test_case_insensitive() {
        let m = matcher(&["Free", "act now"]);
        let found = m.find("FREE stuff, ACT NOW");
        assert_eq!(found.total, 2);
        assert_eq!(found.found().collect::<Vec<_>>(), vec!["Free", "act now"]);
    }

    #[test]
    fn test_found_follows_list_order() {
        let m = matcher(&["win", "prize", "urgent"]);
        let found = m.find("urgent prize urgent win");
        assert_eq!(found.found().collect::<Vec<_>>(), vec!["win", "prize", "urgent"]);
    }

    #[test]
    fn test_total_independent_of_keyword_order() {
        let text = "free cash bonus free deal";
        let a = matcher(&["free", "cash", "bonus", "deal"]).find(text);
        let b = matcher(&["deal", "bonus", "cash", "free"]).find(text);
        assert_eq!(a.total, b.total);
        assert_eq!(a.max_count(), b.max_count());
    }

    #[test]
    fn test_no_matches() {
        let m = matcher(&["free"]);
        let found = m.find("");
        assert_eq!(found, KeywordMatches::default());
        assert_eq!(found.max_count(), 0);
    }

    #[test]
    fn test_keyword_whitespace_is_canonical() {
        let m = matcher(&[" free", "click  here\t"]);
        let found = m.find("free gift click here");
        assert_eq!(found.total, 2);
        assert_eq!(found.found().collect::<Vec<_>>(), vec!["free", "click here"]);
        assert_eq!(m.keywords().collect::<Vec<_>>(), vec!["free", "click here"]);
    }

    #[test]
    fn test_keywords_with_regex_metacharacters() {
        let m = matcher(&["c.o.d"]);
        assert_eq!(m.find("pay c.o.d today").total, 1);
        assert_eq!(m.find("pay cxoxd today").total, 0);
    }
}
