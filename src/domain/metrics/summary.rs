//! Aggregate statistics over a dataset's metrics records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::MetricsRecord;

/// Column-wise means of every numeric metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricMeans {
    pub bleu_avg: f64,
    pub bleu_1: f64,
    pub bleu_2: f64,
    pub bleu_3: f64,
    pub bleu_4: f64,
    pub rouge_l: f64,
    pub semantic_similarity: f64,
    pub recall: f64,
    pub length: f64,
}

/// Summary of one dataset's benchmark results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub record_count: usize,
    pub means: MetricMeans,
    /// Share of records where retrieval or generation failed outright
    pub llm_error_pct: f64,
    /// Share of records where the retriever found nothing
    pub retrieve_error_pct: f64,
}

impl BenchmarkSummary {
    /// Returns `None` for an empty result set
    pub fn from_records(records: &[MetricsRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let n = records.len() as f64;
        let mean = |f: fn(&MetricsRecord) -> f64| records.iter().map(f).sum::<f64>() / n;

        let means = MetricMeans {
            bleu_avg: mean(|r| r.metrics.bleu_avg),
            bleu_1: mean(|r| r.metrics.bleu_1),
            bleu_2: mean(|r| r.metrics.bleu_2),
            bleu_3: mean(|r| r.metrics.bleu_3),
            bleu_4: mean(|r| r.metrics.bleu_4),
            rouge_l: mean(|r| r.metrics.rouge_l),
            semantic_similarity: mean(|r| r.metrics.semantic_similarity),
            recall: mean(|r| r.metrics.recall),
            length: mean(|r| r.metrics.length as f64),
        };

        let llm_errors = records.iter().filter(|r| r.is_instruction_failure()).count();
        let retrieve_errors = records.iter().filter(|r| r.is_empty_response()).count();

        Some(Self {
            record_count: records.len(),
            means,
            llm_error_pct: 100.0 * llm_errors as f64 / n,
            retrieve_error_pct: 100.0 * retrieve_errors as f64 / n,
        })
    }
}

impl fmt::Display for BenchmarkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.means;
        writeln!(f, "bleu-avg             {:.6}", m.bleu_avg)?;
        writeln!(f, "bleu-1               {:.6}", m.bleu_1)?;
        writeln!(f, "bleu-2               {:.6}", m.bleu_2)?;
        writeln!(f, "bleu-3               {:.6}", m.bleu_3)?;
        writeln!(f, "bleu-4               {:.6}", m.bleu_4)?;
        writeln!(f, "rouge-L              {:.6}", m.rouge_l)?;
        writeln!(f, "semantic similarity  {:.6}", m.semantic_similarity)?;
        writeln!(f, "recall               {:.6}", m.recall)?;
        write!(f, "length               {:.6}", m.length)
    }
}
