//! Domain layer - Core benchmark entities and the seams to external collaborators

pub mod dataset;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod metrics;
pub mod retrieval;
pub mod scoring;

pub use dataset::{DatasetConfig, DatasetInfo, DatasetSelection, GroundTruthItem};
pub use error::DomainError;
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, ToolCall, Usage,
};
pub use metrics::{BenchmarkSummary, EvaluationLog, Metrics, MetricsRecord};
pub use retrieval::{EngineFactory, GeneratedAnswer, IndexConfig, RetrievalEngine, ScoredPassage};
