//! Benchmark metrics records and aggregation

mod record;
mod summary;

pub use record::{
    EvaluationLog, Metrics, MetricsRecord, EMPTY_RESPONSE_TEXT, INSTRUCTION_FAILURE_TEXT,
};
pub use summary::{BenchmarkSummary, MetricMeans};
