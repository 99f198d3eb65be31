//! Token-count estimation for callers without a model tokenizer.

use corpus::TokenCounter;

/// Character-based token estimator.
///
/// Real token counts come from an embedding-model tokenizer behind the
/// [`TokenCounter`] seam; this estimator exists so the CLI can triage a
/// folder without shipping a model. It uses the usual BPE rule of thumb of
/// roughly four characters per token, which is plenty for picking a length
/// tier with boundaries thousands of tokens apart.
#[derive(Debug, Clone)]
pub struct HeuristicTokenCounter {
    chars_per_token: u32,
}

impl Default for HeuristicTokenCounter {
    fn default() -> Self {
        HeuristicTokenCounter { chars_per_token: 4 }
    }
}

impl TokenCounter for HeuristicTokenCounter {
    fn count_tokens(&self, text: &str) -> i64 {
        // Unsigned arithmetic; div_ceil on the signed types is not stable.
        let chars = text.chars().count() as u64;
        let per = u64::from(self.chars_per_token.max(1));
        chars.div_ceil(per) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_counts_zero() {
        assert_eq!(HeuristicTokenCounter::default().count_tokens(""), 0);
    }

    #[test]
    fn estimate_is_roughly_chars_over_four() {
        let counter = HeuristicTokenCounter::default();
        assert_eq!(counter.count_tokens("abcd"), 1);
        assert_eq!(counter.count_tokens("abcde"), 2);
        let text = "a".repeat(14_000);
        assert_eq!(counter.count_tokens(&text), 3_500);
    }

    #[test]
    fn multibyte_characters_count_once() {
        let counter = HeuristicTokenCounter::default();
        // Four scalar values, regardless of byte length.
        assert_eq!(counter.count_tokens("日本語字"), 1);
    }
}
