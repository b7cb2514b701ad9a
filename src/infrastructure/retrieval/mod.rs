//! Bundled retrieval engine: paragraph chunks in a flat cosine index

mod chunker;
mod engine;
mod factory;
mod vector_index;

pub use chunker::ParagraphChunker;
pub use engine::{EngineSettings, VectorRetrievalEngine};
pub use factory::VectorEngineFactory;
pub use vector_index::{IndexedChunk, VectorIndex};
