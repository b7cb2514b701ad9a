use async_trait::async_trait;

use super::{GeneratedAnswer, ScoredPassage};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// A built retrieval index that can answer questions
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RetrievalEngine: Send + Sync {
    /// Ranked passages for a question, best first
    async fn retrieve(&self, question: &str) -> Result<Vec<ScoredPassage>, DomainError>;

    /// Answer a question from the retrieved context
    async fn generate(&self, question: &str) -> Result<GeneratedAnswer, DomainError>;
}
