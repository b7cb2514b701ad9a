//! In-memory vector index with JSON persistence

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::embedding::cosine_similarity;
use crate::domain::{DomainError, ScoredPassage};

const INDEX_FILE: &str = "index.json";

/// A chunk of a source document with its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub id: String,
    pub text: String,
    pub source: String,
    pub embedding: Vec<f32>,
}

/// Flat cosine-similarity index over document chunks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorIndex {
    embedding_model: String,
    chunks: Vec<IndexedChunk>,
}

impl VectorIndex {
    pub fn new(embedding_model: impl Into<String>) -> Self {
        Self {
            embedding_model: embedding_model.into(),
            chunks: Vec::new(),
        }
    }

    pub fn index_file(dir: &Path) -> PathBuf {
        dir.join(INDEX_FILE)
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    pub fn push(&mut self, chunk: IndexedChunk) {
        self.chunks.push(chunk);
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Top `top_k` chunks by cosine similarity, best first
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<ScoredPassage> {
        let mut scored: Vec<(f32, &IndexedChunk)> = self
            .chunks
            .iter()
            .map(|chunk| (cosine_similarity(query, &chunk.embedding), chunk))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        scored
            .into_iter()
            .take(top_k)
            .map(|(score, chunk)| ScoredPassage::new(chunk.text.clone(), score))
            .collect()
    }

    pub async fn persist(&self, dir: &Path) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            DomainError::storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        let path = Self::index_file(dir);
        let json = serde_json::to_vec(self)
            .map_err(|e| DomainError::storage(format!("Failed to serialize index: {}", e)))?;

        tokio::fs::write(&path, json).await.map_err(|e| {
            DomainError::storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!("Persisted {} chunks to {}", self.chunks.len(), path.display());
        Ok(())
    }

    pub async fn load(dir: &Path) -> Result<Self, DomainError> {
        let path = Self::index_file(dir);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            DomainError::storage(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::storage(format!("Malformed index {}: {}", path.display(), e))
        })
    }
}
