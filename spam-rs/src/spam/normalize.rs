//! Text normalization shared by the keyword rules

/// Canonical form used for keyword counting.
///
/// Lower-cases, drops ASCII punctuation, collapses whitespace runs into a
/// single space and trims the ends. Casing and punctuation rules work on the
/// raw text instead.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    collapse_whitespace(&stripped)
}

/// Whitespace as mail text sees it: Unicode white space plus the ASCII
/// file, group, record and unit separators (`\x1c`..=`\x1f`).
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// True for empty or whitespace-only text
pub fn is_blank(text: &str) -> bool {
    text.chars().all(is_space)
}

/// Collapse whitespace runs into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split(is_space)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("YOU'VE WON $1,000,000!!!"), "youve won 1000000");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  click\t\there \n\n now  "), "click here now");
    }

    #[test]
    fn test_punctuation_between_words_joins_them() {
        assert_eq!(normalize("fake-winner-site.com"), "fakewinnersitecom");
    }

    #[test]
    fn test_keeps_non_ascii_symbols() {
        assert_eq!(normalize("Café — «offre»"), "café — «offre»");
    }

    #[test]
    fn test_separator_controls_are_whitespace() {
        assert_eq!(normalize("free\x1fcash\x1c"), "free cash");
        assert!(is_blank("\x1f"));
        assert!(is_blank(" \x1c\x1d\x1e\t"));
        assert!(!is_blank("\x1fa"));
        assert!(!is_blank("\x1b"));
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n"), "");
        assert_eq!(normalize("!!!"), "");
    }
}
