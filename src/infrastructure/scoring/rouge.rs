//! ROUGE-N and ROUGE-L F-measures

use super::ngram::ngram_counts;
use crate::domain::scoring::{RougeScorer, RougeScores, RougeType, Tokenizer};
use crate::domain::DomainError;

/// Longest-common-subsequence and n-gram overlap scorer.
///
/// With several references the best F-measure wins; scores are averaged
/// over predictions.
#[derive(Debug, Clone, Default)]
pub struct LcsRougeScorer;

impl LcsRougeScorer {
    pub fn new() -> Self {
        Self
    }
}

impl RougeScorer for LcsRougeScorer {
    fn score(
        &self,
        predictions: &[String],
        references: &[Vec<String>],
        tokenizer: &dyn Tokenizer,
        variants: &[RougeType],
    ) -> Result<RougeScores, DomainError> {
        if predictions.len() != references.len() {
            return Err(DomainError::scorer(
                "rouge",
                format!(
                    "{} predictions but {} reference sets",
                    predictions.len(),
                    references.len()
                ),
            ));
        }

        if predictions.is_empty() {
            return Err(DomainError::scorer("rouge", "no predictions to score"));
        }

        let mut scores = RougeScores::new();

        for variant in variants {
            let mut total = 0.0;

            for (prediction, refs) in predictions.iter().zip(references) {
                let pred_tokens = tokenizer.tokenize(prediction);
                total += refs
                    .iter()
                    .map(|r| variant_fmeasure(*variant, &pred_tokens, &tokenizer.tokenize(r)))
                    .fold(0.0, f64::max);
            }

            scores = scores.with(*variant, total / predictions.len() as f64);
        }

        Ok(scores)
    }
}

fn variant_fmeasure(variant: RougeType, prediction: &[String], reference: &[String]) -> f64 {
    match variant {
        RougeType::Rouge1 => ngram_fmeasure(prediction, reference, 1),
        RougeType::Rouge2 => ngram_fmeasure(prediction, reference, 2),
        RougeType::RougeL => {
            let lcs = lcs_length(prediction, reference);
            fmeasure(lcs, prediction.len(), reference.len())
        }
    }
}

fn ngram_fmeasure(prediction: &[String], reference: &[String], n: usize) -> f64 {
    let pred_counts = ngram_counts(prediction, n);
    let ref_counts = ngram_counts(reference, n);

    let overlap: usize = pred_counts
        .iter()
        .filter(|(ngram, _)| ngram.len() == n)
        .map(|(ngram, count)| (*count).min(ref_counts.get(ngram).copied().unwrap_or(0)))
        .sum();

    let pred_total = prediction.len().saturating_sub(n - 1);
    let ref_total = reference.len().saturating_sub(n - 1);

    fmeasure(overlap, pred_total, ref_total)
}

fn fmeasure(overlap: usize, pred_total: usize, ref_total: usize) -> f64 {
    if overlap == 0 || pred_total == 0 || ref_total == 0 {
        return 0.0;
    }

    let precision = overlap as f64 / pred_total as f64;
    let recall = overlap as f64 / ref_total as f64;

    2.0 * precision * recall / (precision + recall)
}

/// Length of the longest common subsequence, two-row DP
fn lcs_length(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for token in a {
        for (j, other) in b.iter().enumerate() {
            curr[j + 1] = if token == other {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
