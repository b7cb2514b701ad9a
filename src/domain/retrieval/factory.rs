use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RetrievalEngine;
use crate::domain::DomainError;

/// Where an index lives and how it is queried
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    pub persist_path: PathBuf,
    pub top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl IndexConfig {
    pub fn new(persist_path: impl Into<PathBuf>) -> Self {
        Self {
            persist_path: persist_path.into(),
            top_k: 5,
            chunk_size: 1024,
            chunk_overlap: 0,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_chunking(mut self, chunk_size: usize, chunk_overlap: usize) -> Self {
        self.chunk_size = chunk_size;
        self.chunk_overlap = chunk_overlap;
        self
    }

    pub fn persist_path(&self) -> &Path {
        &self.persist_path
    }
}

/// Builds retrieval engines over document sets
#[async_trait]
pub trait EngineFactory: Send + Sync {
    /// Index the documents and persist the index at `config.persist_path`
    async fn build_index(
        &self,
        document_files: &[PathBuf],
        config: &IndexConfig,
    ) -> Result<Arc<dyn RetrievalEngine>, DomainError>;

    /// Reopen an index previously persisted at `config.persist_path`
    async fn load_index(&self, config: &IndexConfig) -> Result<Arc<dyn RetrievalEngine>, DomainError>;

    /// Whether a persisted index exists for `config`
    fn index_exists(&self, config: &IndexConfig) -> bool;
}
