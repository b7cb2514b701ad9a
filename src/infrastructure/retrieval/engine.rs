//! Vector retrieval engine answering questions from an in-memory index

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::vector_index::VectorIndex;
use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::metrics::EMPTY_RESPONSE_TEXT;
use crate::domain::{DomainError, GeneratedAnswer, RetrievalEngine, ScoredPassage};

const QA_PROMPT_TEMPLATE: &str = "Context information is below.\n\
---------------------\n\
${context}\n\
---------------------\n\
Given the context information and not prior knowledge, answer the query.\n\
Query: ${query}\n\
Answer: ";

/// Model settings shared by every engine a factory builds
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub embedding_model: String,
    pub embedding_dimensions: Option<usize>,
    pub llm_model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl EngineSettings {
    pub fn new(embedding_model: impl Into<String>, llm_model: impl Into<String>) -> Self {
        Self {
            embedding_model: embedding_model.into(),
            embedding_dimensions: None,
            llm_model: llm_model.into(),
            temperature: 0.0,
            max_tokens: None,
        }
    }

    pub fn with_embedding_dimensions(mut self, dimensions: Option<usize>) -> Self {
        self.embedding_dimensions = dimensions;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[derive(Debug)]
pub struct VectorRetrievalEngine {
    index: VectorIndex,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    settings: EngineSettings,
    top_k: usize,
}

impl VectorRetrievalEngine {
    pub fn new(
        index: VectorIndex,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        settings: EngineSettings,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            embedder,
            llm,
            settings,
            top_k,
        }
    }

    async fn embed_query(&self, question: &str) -> Result<Vec<f32>, DomainError> {
        let request =
            EmbeddingRequest::new(&self.settings.embedding_model, vec![question.to_string()])
                .with_dimensions(self.settings.embedding_dimensions);

        let response = self
            .embedder
            .embed(request)
            .await
            .map_err(|e| DomainError::retrieval(format!("Failed to embed question: {}", e)))?;

        response
            .into_vectors()
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::retrieval("Embedding provider returned no vector"))
    }

    fn build_prompt(question: &str, passages: &[ScoredPassage]) -> String {
        let context = passages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        QA_PROMPT_TEMPLATE
            .replace("${context}", &context)
            .replace("${query}", question)
    }
}

#[async_trait]
impl RetrievalEngine for VectorRetrievalEngine {
    async fn retrieve(&self, question: &str) -> Result<Vec<ScoredPassage>, DomainError> {
        if self.index.is_empty() {
            return Ok(Vec::new());
        }

        let query = self.embed_query(question).await?;
        Ok(self.index.search(&query, self.top_k))
    }

    async fn generate(&self, question: &str) -> Result<GeneratedAnswer, DomainError> {
        let passages = self.retrieve(question).await?;
        if passages.is_empty() {
            debug!("No context retrieved for question");
            return Ok(GeneratedAnswer::new(EMPTY_RESPONSE_TEXT));
        }

        let request = LlmRequest::builder()
            .user(Self::build_prompt(question, &passages))
            .temperature(self.settings.temperature)
            .max_tokens_opt(self.settings.max_tokens)
            .build();

        let response = self
            .llm
            .chat(&self.settings.llm_model, request)
            .await
            .map_err(|e| DomainError::generation(e.to_string()))?;

        let text = response.content().trim();
        let text = if text.is_empty() { EMPTY_RESPONSE_TEXT } else { text };

        Ok(GeneratedAnswer::new(text)
            .with_metadata("model", serde_json::json!(response.model))
            .with_metadata("source_count", serde_json::json!(passages.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::llm::MockLlmProvider;
    use crate::infrastructure::retrieval::IndexedChunk;

    const DIMS: usize = 256;

    fn index_of(texts: &[&str]) -> VectorIndex {
        let embedder = MockEmbeddingProvider::new(DIMS);
        let mut index = VectorIndex::new("mock-embed");
        for (i, text) in texts.iter().enumerate() {
            index.push(IndexedChunk {
                id: i.to_string(),
                text: text.to_string(),
                source: "doc.txt".to_string(),
                embedding: embedder.vector_for(text),
            });
        }
        index
    }

    fn engine(index: VectorIndex, llm: Arc<MockLlmProvider>) -> VectorRetrievalEngine {
        VectorRetrievalEngine::new(
            index,
            Arc::new(MockEmbeddingProvider::new(DIMS)),
            llm,
            EngineSettings::new("mock-embed", "gpt-3.5"),
            2,
        )
    }

    #[tokio::test]
    async fn test_retrieve_ranks_closest_first() {
        let llm = Arc::new(MockLlmProvider::new("mock"));
        let engine = engine(index_of(&["zzzz", "Bob likes apples", "qqqq"]), llm);

        let passages = engine.retrieve("Bob likes apples").await.unwrap();

        assert_eq!(passages.len(), 2);
        assert_eq!(passages[0].text, "Bob likes apples");
    }

    #[tokio::test]
    async fn test_generate_sends_context_prompt() {
        let llm = Arc::new(MockLlmProvider::new("mock").with_reply("  Bob likes apples.  "));
        let engine = engine(index_of(&["Bob likes apples"]), llm.clone());

        let answer = engine.generate("What does Bob like?").await.unwrap();

        assert_eq!(answer.text, "Bob likes apples.");
        assert_eq!(answer.metadata["source_count"], 1);

        let requests = llm.requests();
        let prompt = requests[0].messages[0].content_text();
        assert!(prompt.contains("Bob likes apples"));
        assert!(prompt.contains("Query: What does Bob like?"));
    }

    #[tokio::test]
    async fn test_generate_empty_index_is_empty_response() {
        let llm = Arc::new(MockLlmProvider::new("mock").with_reply("unused"));
        let engine = engine(VectorIndex::new("mock-embed"), llm.clone());

        let answer = engine.generate("anything").await.unwrap();

        assert_eq!(answer.text, EMPTY_RESPONSE_TEXT);
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn test_generate_blank_reply_is_empty_response() {
        let llm = Arc::new(MockLlmProvider::new("mock").with_reply("   "));
        let engine = engine(index_of(&["Bob likes apples"]), llm);

        let answer = engine.generate("What does Bob like?").await.unwrap();
        assert_eq!(answer.text, EMPTY_RESPONSE_TEXT);
    }

    #[tokio::test]
    async fn test_llm_failure_is_generation_error() {
        let llm = Arc::new(MockLlmProvider::new("mock").with_error("rate limited"));
        let engine = engine(index_of(&["Bob likes apples"]), llm);

        let result = engine.generate("What does Bob like?").await;
        assert!(matches!(result, Err(DomainError::Generation { .. })));
    }

    #[tokio::test]
    async fn test_embedding_failure_is_retrieval_error() {
        let engine = VectorRetrievalEngine::new(
            index_of(&["Bob likes apples"]),
            Arc::new(MockEmbeddingProvider::new(DIMS).with_error("down")),
            Arc::new(MockLlmProvider::new("mock")),
            EngineSettings::new("mock-embed", "gpt-3.5"),
            2,
        );

        let result = engine.retrieve("What does Bob like?").await;
        assert!(matches!(result, Err(DomainError::Retrieval { .. })));
    }
}
