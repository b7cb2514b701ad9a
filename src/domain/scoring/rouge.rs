use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::Tokenizer;
use crate::domain::DomainError;

/// ROUGE variants a caller may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RougeType {
    #[serde(rename = "rouge1")]
    Rouge1,
    #[serde(rename = "rouge2")]
    Rouge2,
    #[serde(rename = "rougeL")]
    RougeL,
}

/// F-measure per requested variant, averaged over predictions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RougeScores(BTreeMap<RougeType, f64>);

impl RougeScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, variant: RougeType, score: f64) -> Self {
        self.0.insert(variant, score);
        self
    }

    pub fn get(&self, variant: RougeType) -> Option<f64> {
        self.0.get(&variant).copied()
    }
}

pub trait RougeScorer: Send + Sync + Debug {
    fn score(
        &self,
        predictions: &[String],
        references: &[Vec<String>],
        tokenizer: &dyn Tokenizer,
        variants: &[RougeType],
    ) -> Result<RougeScores, DomainError>;
}
