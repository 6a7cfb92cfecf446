//! Text cleaning for raw OCR output.
//!
//! OCR on binarized screenshots produces stray symbols and ragged
//! whitespace. Cleaning collapses whitespace runs, drops characters
//! outside word/space/`.`/`,`/`!`/`?`, collapses a repeated punctuation
//! mark down to one, and trims the ends.

use regex::Regex;
use std::sync::LazyLock;

use crate::store::StoreMap;

/// Regex to collapse runs of whitespace into a single space.
static WHITESPACE_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Regex matching characters outside the allowed set.
///
/// `\w` is Unicode-aware, so Cyrillic OCR output survives the filter.
static DISALLOWED_CHAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,!?]").unwrap());

/// Regex matching sentence-like fragments: a capital letter up to the
/// next terminator.
static SENTENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][^.!?]*[.!?]").unwrap());

/// Punctuation marks whose runs are collapsed to a single mark.
const COLLAPSIBLE_PUNCT: &[char] = &['.', ',', '!', '?'];

/// Cleaner for extracted slide text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner;

impl TextCleaner {
    /// Create a new cleaner.
    pub fn new() -> Self {
        Self
    }

    /// Clean a single extracted string.
    ///
    /// - Collapses whitespace runs to one space
    /// - Removes characters outside word/space/`.`/`,`/`!`/`?`
    /// - Collapses runs of the same punctuation mark ("!!" becomes "!")
    /// - Trims leading and trailing whitespace
    pub fn clean_text(&self, text: &str) -> String {
        let collapsed = WHITESPACE_RUN_REGEX.replace_all(text, " ");
        let filtered = DISALLOWED_CHAR_REGEX.replace_all(&collapsed, "");

        // Collapse repeated punctuation. The regex crate has no
        // backreferences, so this is a single pass over the chars.
        let mut output = String::with_capacity(filtered.len());
        let mut prev: Option<char> = None;
        for c in filtered.chars() {
            if COLLAPSIBLE_PUNCT.contains(&c) && prev == Some(c) {
                continue;
            }
            output.push(c);
            prev = Some(c);
        }

        output.trim().to_string()
    }

    /// Clean every string in a store map, preserving shape and order.
    pub fn clean_store(&self, map: &StoreMap) -> StoreMap {
        map.iter()
            .map(|(label, texts)| {
                let cleaned = texts.iter().map(|t| self.clean_text(t)).collect();
                (label.clone(), cleaned)
            })
            .collect()
    }

    /// Extract sentence-like fragments from cleaned text, per label.
    ///
    /// A fragment starts at a capital letter and runs to the next
    /// `.`/`!`/`?`. Matching is ASCII-capital only.
    pub fn relevant_info(&self, cleaned: &StoreMap) -> StoreMap {
        cleaned
            .iter()
            .map(|(label, texts)| {
                let fragments = texts
                    .iter()
                    .flat_map(|t| {
                        SENTENCE_REGEX.find_iter(t).map(|m| m.as_str().to_string())
                    })
                    .collect();
                (label.clone(), fragments)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace_runs() {
        let cleaner = TextCleaner::new();

        assert_eq!(cleaner.clean_text("Hello    world"), "Hello world");
        assert_eq!(cleaner.clean_text("a\t\tb\n\nc"), "a b c");
    }

    #[test]
    fn test_strip_disallowed_characters() {
        let cleaner = TextCleaner::new();

        assert_eq!(cleaner.clean_text("Hello* (world)"), "Hello world");
        assert_eq!(cleaner.clean_text("price: $100"), "price 100");
        assert_eq!(cleaner.clean_text("keep. these, marks! ok?"), "keep. these, marks! ok?");
    }

    #[test]
    fn test_collapse_repeated_punctuation() {
        let cleaner = TextCleaner::new();

        assert_eq!(cleaner.clean_text("wow!!"), "wow!");
        assert_eq!(cleaner.clean_text("what???"), "what?");
        assert_eq!(cleaner.clean_text("wait...,, go"), "wait., go");
    }

    #[test]
    fn test_trim_ends() {
        let cleaner = TextCleaner::new();

        assert_eq!(cleaner.clean_text("  Hello  "), "Hello");
    }

    #[test]
    fn test_padded_double_exclamation() {
        // Whitespace collapsed, doubled exclamation reduced, trailing
        // space trimmed.
        let cleaner = TextCleaner::new();

        assert_eq!(cleaner.clean_text("Hello   world!!  "), "Hello world!");
    }

    #[test]
    fn test_cyrillic_survives_filter() {
        let cleaner = TextCleaner::new();

        assert_eq!(
            cleaner.clean_text("Привет, хакатон!  «LATOKEN»"),
            "Привет, хакатон! LATOKEN"
        );
    }

    #[test]
    fn test_clean_store_preserves_shape() {
        let cleaner = TextCleaner::new();

        let mut map = StoreMap::new();
        map.insert(
            "a".to_string(),
            vec!["Hello   world!!  ".to_string(), "second".to_string()],
        );
        map.insert("b".to_string(), vec!["  x ".to_string()]);

        let cleaned = cleaner.clean_store(&map);

        assert_eq!(cleaned["a"], vec!["Hello world!", "second"]);
        assert_eq!(cleaned["b"], vec!["x"]);
    }

    #[test]
    fn test_relevant_info_extracts_sentences() {
        let cleaner = TextCleaner::new();

        let mut cleaned = StoreMap::new();
        cleaned.insert(
            "a".to_string(),
            vec!["Join the hackathon. prizes await! Apply now?".to_string()],
        );

        let info = cleaner.relevant_info(&cleaned);

        // "prizes await!" starts lowercase and is skipped.
        assert_eq!(info["a"], vec!["Join the hackathon.", "Apply now?"]);
    }

    #[test]
    fn test_relevant_info_spans_entries() {
        let cleaner = TextCleaner::new();

        let mut cleaned = StoreMap::new();
        cleaned.insert(
            "a".to_string(),
            vec!["First point.".to_string(), "Second point!".to_string()],
        );

        let info = cleaner.relevant_info(&cleaned);

        assert_eq!(info["a"], vec!["First point.", "Second point!"]);
    }

    #[test]
    fn test_relevant_info_no_match_is_empty() {
        let cleaner = TextCleaner::new();

        let mut cleaned = StoreMap::new();
        cleaned.insert("a".to_string(), vec!["no capitals here".to_string()]);

        let info = cleaner.relevant_info(&cleaned);

        assert!(info["a"].is_empty());
    }
}
