//! Human-readable rendering of a classification

use std::fmt;

use crate::spam::{Classification, Verdict};

const RULE: &str = "============================================================";

/// Report of one classification, formatted the way the command-line tool
/// prints it
pub struct Report<'a>(pub &'a Classification);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let classification = self.0;
        let Some(analysis) = &classification.analysis else {
            writeln!(f, "Classification: {}", Verdict::Invalid)?;
            return writeln!(f, "No email content provided.");
        };

        writeln!(f, "{}", RULE)?;
        writeln!(f, "RESULT:")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Classification: {}", classification.verdict)?;
        writeln!(
            f,
            "Spam Score: {} (Threshold: {})",
            analysis.spam_score, analysis.threshold
        )?;
        writeln!(f)?;
        writeln!(f, "Details:")?;
        writeln!(f, "  - Spam Keywords Found: {}", analysis.keyword_count)?;
        if !analysis.found_keywords.is_empty() {
            writeln!(f, "  - Keywords: {}", analysis.found_keywords.join(", "))?;
        }
        writeln!(f, "  - URLs Found: {}", analysis.url_count)?;
        writeln!(f, "  - Excessive Capitals: {}", analysis.excessive_capitals)?;
        writeln!(f, "  - Exclamation Marks: {}", analysis.exclamation_marks)?;
        writeln!(
            f,
            "  - Repeated Special Chars: {}",
            analysis.repeated_special_chars
        )?;
        writeln!(f, "  - Repeated Spam Keywords: {}", analysis.repeated_keywords)?;

        if !classification.contributions.is_empty() {
            writeln!(f)?;
            writeln!(f, "Rules:")?;
            for c in &classification.contributions {
                writeln!(f, "  {:<24} +{:.2}  {}", c.rule, c.score, c.rule.description())?;
            }
        }

        Ok(())
    }
}

/// Render a classification to a string
pub fn render(classification: &Classification) -> String {
    Report(classification).to_string()
}
