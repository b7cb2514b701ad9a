//! Tokenizers for BLEU and ROUGE

use std::fmt;

use jieba_rs::Jieba;
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::scoring::Tokenizer;

/// Chinese word segmentation with the bundled jieba dictionary and HMM for
/// unknown words. Latin runs come through as whole words; whitespace tokens
/// are dropped.
pub struct JiebaTokenizer {
    jieba: Jieba,
}

impl JiebaTokenizer {
    /// Load the default dictionary
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
        }
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JiebaTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiebaTokenizer").finish_non_exhaustive()
    }
}

impl Tokenizer for JiebaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, true)
            .into_iter()
            .filter(|word| !word.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Splits on Unicode word boundaries (UAX #29) and drops whitespace.
///
/// Latin text splits into words, punctuation becomes its own token, and
/// each CJK ideograph is a separate token.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jieba_segments_chinese_words() {
        let tokens = JiebaTokenizer::new().tokenize("我来到北京清华大学");
        assert_eq!(tokens, vec!["我", "来到", "北京", "清华大学"]);
    }

    #[test]
    fn test_jieba_drops_whitespace() {
        let tokens = JiebaTokenizer::new().tokenize("北京 \n 大学");
        assert!(tokens.iter().all(|t| !t.trim().is_empty()));
        assert_eq!(tokens.concat(), "北京大学");
    }

    #[test]
    fn test_jieba_keeps_latin_words() {
        let tokens = JiebaTokenizer::new().tokenize("Bob likes traveling");
        assert_eq!(tokens, vec!["Bob", "likes", "traveling"]);
    }

    #[test]
    fn test_latin_words_and_punctuation() {
        let tokens = UnicodeWordTokenizer::new().tokenize("Bob likes traveling.");
        assert_eq!(tokens, vec!["Bob", "likes", "traveling", "."]);
    }

    #[test]
    fn test_cjk_splits_per_ideograph() {
        let tokens = UnicodeWordTokenizer::new().tokenize("启明行动");
        assert_eq!(tokens, vec!["启", "明", "行", "动"]);
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(UnicodeWordTokenizer::new().tokenize("  \n\t ").is_empty());
        assert!(JiebaTokenizer::new().tokenize("  \n\t ").is_empty());
    }

    #[test]
    fn test_word_level_bleu_units_differ() {
        // One dictionary word, four ideographs
        assert_eq!(JiebaTokenizer::new().tokenize("清华大学").len(), 1);
        assert_eq!(UnicodeWordTokenizer::new().tokenize("清华大学").len(), 4);
    }
}
