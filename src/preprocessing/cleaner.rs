//! Headline cleaning

use regex::Regex;
use std::sync::OnceLock;

fn punctuation() -> &'static Regex {
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
    PUNCTUATION.get_or_init(|| Regex::new(r"[^\w\s]").expect("static pattern"))
}

/// Strip punctuation and lowercase a headline
///
/// Keeps only word characters and whitespace (Unicode-aware), so
/// `"Apple's Q3 beat!"` becomes `"apples q3 beat"`.
pub fn clean_headline(text: &str) -> String {
    punctuation().replace_all(text, "").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_basic() {
        assert_eq!(clean_headline("Apple's Q3 beat!"), "apples q3 beat");
        assert_eq!(
            clean_headline("Agilent Technologies (A) Shares Up 3.4%"),
            "agilent technologies a shares up 34"
        );
    }

    #[test]
    fn test_clean_keeps_whitespace_and_underscores() {
        assert_eq!(clean_headline("snake_case  stays"), "snake_case  stays");
    }

    #[test]
    fn test_clean_unicode_words() {
        assert_eq!(clean_headline("Café — Über €5!"), "café  über 5");
    }

    #[test]
    fn test_clean_output_has_no_punctuation_or_uppercase() {
        let inputs = [
            "Hello, World!",
            "BREAKING: S&P 500 hits record; Dow -2.1%",
            "\"Quoted\" [brackets] {braces} <tags> @user #tag $TSLA",
            "",
        ];
        for input in inputs {
            let cleaned = clean_headline(input);
            assert!(cleaned.chars().all(|c| c.is_alphanumeric() || c == '_' || c.is_whitespace()));
            assert_eq!(cleaned, cleaned.to_lowercase());
        }
    }
}
