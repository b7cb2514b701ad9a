//! Builds and reopens vector retrieval engines

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use super::chunker::ParagraphChunker;
use super::engine::{EngineSettings, VectorRetrievalEngine};
use super::vector_index::{IndexedChunk, VectorIndex};
use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::llm::LlmProvider;
use crate::domain::{DomainError, EngineFactory, IndexConfig, RetrievalEngine};

const EMBEDDING_BATCH_SIZE: usize = 64;

#[derive(Debug)]
pub struct VectorEngineFactory {
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    settings: EngineSettings,
}

impl VectorEngineFactory {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            embedder,
            llm,
            settings,
        }
    }

    fn engine(&self, index: VectorIndex, config: &IndexConfig) -> Arc<dyn RetrievalEngine> {
        Arc::new(VectorRetrievalEngine::new(
            index,
            self.embedder.clone(),
            self.llm.clone(),
            self.settings.clone(),
            config.top_k,
        ))
    }

    async fn read_chunks(
        path: &Path,
        chunker: &ParagraphChunker,
    ) -> Result<Vec<(String, String)>, DomainError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::storage(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let source = path.display().to_string();
        Ok(chunker
            .chunk(&content)
            .into_iter()
            .map(|text| (source.clone(), text))
            .collect())
    }

    async fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
        let expected = texts.len();
        let request = EmbeddingRequest::new(&self.settings.embedding_model, texts)
            .with_dimensions(self.settings.embedding_dimensions);

        let vectors = self.embedder.embed(request).await?.into_vectors();
        if vectors.len() != expected {
            return Err(DomainError::provider(
                self.embedder.provider_name(),
                format!("Expected {} embeddings, got {}", expected, vectors.len()),
            ));
        }

        Ok(vectors)
    }
}

#[async_trait]
impl EngineFactory for VectorEngineFactory {
    async fn build_index(
        &self,
        document_files: &[PathBuf],
        config: &IndexConfig,
    ) -> Result<Arc<dyn RetrievalEngine>, DomainError> {
        let chunker = ParagraphChunker::new(config.chunk_size, config.chunk_overlap);

        let mut chunks = Vec::new();
        for path in document_files {
            chunks.extend(Self::read_chunks(path, &chunker).await?);
        }

        let mut index = VectorIndex::new(&self.settings.embedding_model);
        for batch in chunks.chunks(EMBEDDING_BATCH_SIZE) {
            let texts = batch.iter().map(|(_, text)| text.clone()).collect();
            let vectors = self.embed_batch(texts).await?;

            for ((source, text), embedding) in batch.iter().zip(vectors) {
                index.push(IndexedChunk {
                    id: Uuid::new_v4().to_string(),
                    text: text.clone(),
                    source: source.clone(),
                    embedding,
                });
            }
        }

        info!(
            "Indexed {} chunks from {} documents",
            index.len(),
            document_files.len()
        );

        index.persist(config.persist_path()).await?;
        Ok(self.engine(index, config))
    }

    async fn load_index(&self, config: &IndexConfig) -> Result<Arc<dyn RetrievalEngine>, DomainError> {
        let index = VectorIndex::load(config.persist_path()).await?;

        if index.embedding_model() != self.settings.embedding_model {
            return Err(DomainError::configuration(format!(
                "Index at {} was built with '{}', configured model is '{}'",
                config.persist_path().display(),
                index.embedding_model(),
                self.settings.embedding_model
            )));
        }

        info!(
            "Loaded {} chunks from {}",
            index.len(),
            config.persist_path().display()
        );
        Ok(self.engine(index, config))
    }

    fn index_exists(&self, config: &IndexConfig) -> bool {
        VectorIndex::index_file(config.persist_path()).is_file()
    }
}
