//! Embedding request

use serde::{Deserialize, Serialize};

/// One batch of texts to embed with a single model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    model: String,
    inputs: Vec<String>,
    /// Output dimensions, for models that can truncate
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

impl EmbeddingRequest {
    /// Create a request embedding `inputs` in order
    pub fn new(model: impl Into<String>, inputs: Vec<String>) -> Self {
        Self {
            model: model.into(),
            inputs,
            dimensions: None,
        }
    }

    /// Request truncated vectors; `None` keeps the model default
    pub fn with_dimensions(mut self, dimensions: Option<usize>) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Embedding model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Texts in batch order
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Requested output dimensions
    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }
}
