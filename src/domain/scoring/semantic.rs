use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Outcome of comparing a response with its reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub score: f64,
    /// Whether the score reached the evaluator's threshold
    pub passing: bool,
}

/// Embedding-based semantic similarity between two texts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SemanticEvaluator: Send + Sync {
    async fn evaluate(&self, response: &str, reference: &str)
        -> Result<SimilarityResult, DomainError>;
}
