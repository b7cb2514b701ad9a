//! Benchmark dataset definitions

mod entity;
mod selection;

pub use entity::{DatasetConfig, DatasetInfo, GroundTruthItem};
pub use selection::{DatasetSelection, ALL_DATASETS};
