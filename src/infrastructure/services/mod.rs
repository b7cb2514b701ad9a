//! Benchmark services

mod benchmark_runner;
mod evaluation_pipeline;

pub use benchmark_runner::{BenchmarkRunner, BleuBreakdown};
pub use evaluation_pipeline::{DatasetReport, EvaluationPipeline, PipelineSettings};
