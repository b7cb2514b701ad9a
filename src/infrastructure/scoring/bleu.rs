//! Corpus BLEU with brevity penalty

use std::collections::HashMap;

use super::ngram::ngram_counts;
use crate::domain::scoring::{BleuScore, BleuScorer, Tokenizer, MAX_NGRAM_ORDER};
use crate::domain::DomainError;

/// Unsmoothed corpus BLEU over n-gram orders 1..=4
#[derive(Debug, Clone, Default)]
pub struct NgramBleuScorer;

impl NgramBleuScorer {
    pub fn new() -> Self {
        Self
    }
}

impl BleuScorer for NgramBleuScorer {
    fn score(
        &self,
        predictions: &[String],
        references: &[Vec<String>],
        tokenizer: &dyn Tokenizer,
    ) -> Result<BleuScore, DomainError> {
        if predictions.len() != references.len() {
            return Err(DomainError::scorer(
                "bleu",
                format!(
                    "{} predictions but {} reference sets",
                    predictions.len(),
                    references.len()
                ),
            ));
        }

        let mut matches_by_order = [0usize; MAX_NGRAM_ORDER];
        let mut possible_by_order = [0usize; MAX_NGRAM_ORDER];
        let mut translation_length = 0;
        let mut reference_length = 0;

        for (prediction, refs) in predictions.iter().zip(references) {
            let ref_tokens: Vec<Vec<String>> = refs.iter().map(|r| tokenizer.tokenize(r)).collect();
            let shortest_ref = ref_tokens
                .iter()
                .map(Vec::len)
                .min()
                .ok_or_else(|| DomainError::scorer("bleu", "prediction has no reference"))?;
            let pred_tokens = tokenizer.tokenize(prediction);

            reference_length += shortest_ref;
            translation_length += pred_tokens.len();

            let mut merged_ref_counts: HashMap<&[String], usize> = HashMap::new();
            for tokens in &ref_tokens {
                for (ngram, count) in ngram_counts(tokens, MAX_NGRAM_ORDER) {
                    let entry = merged_ref_counts.entry(ngram).or_insert(0);
                    *entry = (*entry).max(count);
                }
            }

            for (ngram, count) in ngram_counts(&pred_tokens, MAX_NGRAM_ORDER) {
                let clipped = count.min(merged_ref_counts.get(ngram).copied().unwrap_or(0));
                matches_by_order[ngram.len() - 1] += clipped;
            }

            for order in 1..=MAX_NGRAM_ORDER {
                if pred_tokens.len() >= order {
                    possible_by_order[order - 1] += pred_tokens.len() - order + 1;
                }
            }
        }

        if translation_length == 0 || reference_length == 0 {
            return Err(DomainError::scorer(
                "bleu",
                "cannot compute brevity penalty for empty text",
            ));
        }

        let mut precisions = [0.0; MAX_NGRAM_ORDER];
        for i in 0..MAX_NGRAM_ORDER {
            if possible_by_order[i] > 0 {
                precisions[i] = matches_by_order[i] as f64 / possible_by_order[i] as f64;
            }
        }

        let geo_mean = if precisions.iter().all(|p| *p > 0.0) {
            let log_sum: f64 = precisions.iter().map(|p| p.ln()).sum();
            (log_sum / MAX_NGRAM_ORDER as f64).exp()
        } else {
            0.0
        };

        let length_ratio = translation_length as f64 / reference_length as f64;
        let brevity_penalty = if length_ratio > 1.0 {
            1.0
        } else {
            (1.0 - 1.0 / length_ratio).exp()
        };

        Ok(BleuScore {
            bleu: geo_mean * brevity_penalty,
            precisions,
            brevity_penalty,
            length_ratio,
            translation_length,
            reference_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scoring::WhitespaceTokenizer;

    fn score(prediction: &str, reference: &str) -> Result<BleuScore, DomainError> {
        NgramBleuScorer::new().score(
            &[prediction.to_string()],
            &[vec![reference.to_string()]],
            &WhitespaceTokenizer,
        )
    }

    #[test]
    fn test_identical_text_scores_one() {
        let result = score("A B C D", "A B C D").unwrap();

        assert!((result.bleu - 1.0).abs() < 1e-9);
        assert_eq!(result.precisions, [1.0; 4]);
        assert!((result.brevity_penalty - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_prediction_is_penalized() {
        let result = score("the cat sat on", "the cat sat on the mat").unwrap();

        assert_eq!(result.precisions, [1.0; 4]);
        // ratio 4/6 => exp(1 - 1.5)
        assert!((result.brevity_penalty - (-0.5f64).exp()).abs() < 1e-9);
        assert!((result.bleu - result.brevity_penalty).abs() < 1e-9);
    }

    #[test]
    fn test_longer_prediction_has_no_penalty() {
        let result = score("a b c d e f", "a b c d").unwrap();
        assert_eq!(result.brevity_penalty, 1.0);
        assert!((result.precisions[0] - 4.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_higher_order_gives_zero_bleu() {
        let result = score("a b c", "a b c").unwrap();

        assert_eq!(result.precisions[3], 0.0);
        assert_eq!(result.bleu, 0.0);
    }

    #[test]
    fn test_clipped_counts() {
        let result = score("the the the the", "the cat").unwrap();
        assert!((result.precisions[0] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_scores_stay_in_unit_range() {
        let result = score("x y z w v u", "a b x y z q").unwrap();

        assert!((0.0..=1.0).contains(&result.bleu));
        for p in result.precisions {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_empty_prediction_is_an_error() {
        let result = score("", "a b");
        assert!(matches!(result, Err(DomainError::Scorer { .. })));
    }

    #[test]
    fn test_mismatched_lengths_is_an_error() {
        let result = NgramBleuScorer::new().score(&["a".to_string()], &[], &WhitespaceTokenizer);
        assert!(result.is_err());
    }
}
