//! Canonical term extraction for the similarity engine.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Extract the normalized term stream for a text payload.
///
/// NFKC normalization first (so composed and decomposed forms of the same
/// text agree), then locale-free Unicode lowercasing, then Unicode word
/// segmentation. Punctuation and whitespace never produce terms, which is
/// what makes "fox" and "fox." the same term downstream.
///
/// Empty, whitespace-only, and punctuation-only text yields an empty stream;
/// the similarity engine turns that into a zero vector.
pub fn terms(text: &str) -> Vec<String> {
    let normalized: String = text.nfkc().collect();
    normalized
        .unicode_words()
        .map(|w| w.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_does_not_change_terms() {
        assert_eq!(
            terms("The quick brown fox"),
            terms("The quick brown fox.")
        );
    }

    #[test]
    fn terms_are_lowercased() {
        assert_eq!(terms("Hello WORLD"), vec!["hello", "world"]);
    }

    #[test]
    fn unicode_equivalent_forms_agree() {
        let composed = "Caf\u{00E9}";
        let decomposed = "Cafe\u{0301}";
        assert_eq!(terms(composed), terms(decomposed));
    }

    #[test]
    fn empty_and_punctuation_only_yield_nothing() {
        assert!(terms("").is_empty());
        assert!(terms("   \n\t ").is_empty());
        assert!(terms("... !!! ---").is_empty());
    }

    #[test]
    fn numbers_and_words_both_count() {
        assert_eq!(terms("version 2 shipped"), vec!["version", "2", "shipped"]);
    }
}
