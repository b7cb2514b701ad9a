use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::Tokenizer;
use crate::domain::DomainError;

/// Highest n-gram order reported
pub const MAX_NGRAM_ORDER: usize = 4;

/// Corpus BLEU result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BleuScore {
    /// Geometric mean of the precisions times the brevity penalty
    pub bleu: f64,
    /// Modified n-gram precisions for orders 1 through 4
    pub precisions: [f64; MAX_NGRAM_ORDER],
    pub brevity_penalty: f64,
    pub length_ratio: f64,
    pub translation_length: usize,
    pub reference_length: usize,
}

/// Scores predictions against one or more references each
pub trait BleuScorer: Send + Sync + Debug {
    fn score(
        &self,
        predictions: &[String],
        references: &[Vec<String>],
        tokenizer: &dyn Tokenizer,
    ) -> Result<BleuScore, DomainError>;
}
