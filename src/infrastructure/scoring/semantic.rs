//! Embedding-based semantic similarity

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::embedding::{cosine_similarity, EmbeddingProvider, EmbeddingRequest};
use crate::domain::scoring::{SemanticEvaluator, SimilarityResult};
use crate::domain::DomainError;

const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Embeds response and reference in one batch and compares them by cosine similarity.
///
/// Negative cosine values are reported as 0.0 so the score stays in [0, 1].
#[derive(Debug)]
pub struct EmbeddingSemanticEvaluator {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
    dimensions: Option<usize>,
    threshold: f64,
}

impl EmbeddingSemanticEvaluator {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            dimensions: None,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_dimensions(mut self, dimensions: Option<usize>) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

#[async_trait]
impl SemanticEvaluator for EmbeddingSemanticEvaluator {
    async fn evaluate(
        &self,
        response: &str,
        reference: &str,
    ) -> Result<SimilarityResult, DomainError> {
        let request =
            EmbeddingRequest::new(&self.model, vec![response.to_string(), reference.to_string()])
                .with_dimensions(self.dimensions);

        let vectors = self
            .provider
            .embed(request)
            .await
            .map_err(|e| DomainError::scorer("semantic_similarity", e.to_string()))?
            .into_vectors();

        let [response_vec, reference_vec] = vectors.as_slice() else {
            return Err(DomainError::scorer(
                "semantic_similarity",
                format!("expected 2 embeddings, got {}", vectors.len()),
            ));
        };

        let score = f64::from(cosine_similarity(response_vec, reference_vec)).clamp(0.0, 1.0);
        debug!(
            "Semantic similarity via {}: {:.4}",
            self.provider.provider_name(),
            score
        );

        Ok(SimilarityResult {
            score,
            passing: score >= self.threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;

    #[tokio::test]
    async fn test_identical_texts_score_one() {
        let evaluator =
            EmbeddingSemanticEvaluator::new(Arc::new(MockEmbeddingProvider::new(64)), "mock");

        let result = evaluator.evaluate("Bob likes traveling", "Bob likes traveling").await.unwrap();

        assert!((result.score - 1.0).abs() < 1e-6);
        assert!(result.passing);
    }

    #[tokio::test]
    async fn test_disjoint_texts_score_low() {
        let evaluator = EmbeddingSemanticEvaluator::new(
            Arc::new(MockEmbeddingProvider::new(1024)),
            "mock",
        )
        .with_threshold(0.5);

        let result = evaluator.evaluate("abc", "xyz").await.unwrap();

        assert!((0.0..0.5).contains(&result.score));
        assert!(!result.passing);
    }

    #[tokio::test]
    async fn test_provider_failure_is_a_scorer_error() {
        let provider = MockEmbeddingProvider::new(8).with_error("quota exhausted");
        let evaluator = EmbeddingSemanticEvaluator::new(Arc::new(provider), "mock");

        let result = evaluator.evaluate("a", "b").await;

        assert!(matches!(result, Err(DomainError::Scorer { .. })));
    }
}
