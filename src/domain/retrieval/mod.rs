//! Retrieval engine seams consumed by the benchmark pipeline

mod engine;
mod factory;
mod passage;

pub use engine::RetrievalEngine;
pub use factory::{EngineFactory, IndexConfig};
pub use passage::{GeneratedAnswer, ScoredPassage};

#[cfg(test)]
pub use engine::MockRetrievalEngine;
