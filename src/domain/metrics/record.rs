//! Per-question metrics record

use serde::{Deserialize, Serialize};

/// Generated text recorded when retrieval or generation failed outright
pub const INSTRUCTION_FAILURE_TEXT: &str = "Retrieve failed due to LLM wasn't follow instruction";

/// Generated text produced by the engine when nothing was retrieved
pub const EMPTY_RESPONSE_TEXT: &str = "Empty Response";

/// Numeric scores for one evaluated question
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(rename = "bleu-avg")]
    pub bleu_avg: f64,
    #[serde(rename = "bleu-1")]
    pub bleu_1: f64,
    #[serde(rename = "bleu-2")]
    pub bleu_2: f64,
    #[serde(rename = "bleu-3")]
    pub bleu_3: f64,
    #[serde(rename = "bleu-4")]
    pub bleu_4: f64,
    #[serde(rename = "rouge-L")]
    pub rouge_l: f64,
    #[serde(rename = "semantic similarity")]
    pub semantic_similarity: f64,
    pub recall: f64,
    /// Character count of the generated text
    pub length: usize,
}

/// Texts that produced the scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationLog {
    pub generated_text: String,
    #[serde(rename = "ground_truth_text")]
    pub reference_text: String,
    pub question: String,
}

/// Result of evaluating one ground-truth question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub metrics: Metrics,
    pub log: EvaluationLog,
}

impl MetricsRecord {
    pub fn new(metrics: Metrics, log: EvaluationLog) -> Self {
        Self { metrics, log }
    }

    /// Zeroed record marking a retrieval or generation failure
    pub fn instruction_failure(question: impl Into<String>, reference_text: impl Into<String>) -> Self {
        Self {
            metrics: Metrics::default(),
            log: EvaluationLog {
                generated_text: INSTRUCTION_FAILURE_TEXT.to_string(),
                reference_text: reference_text.into(),
                question: question.into(),
            },
        }
    }

    pub fn is_instruction_failure(&self) -> bool {
        self.log.generated_text == INSTRUCTION_FAILURE_TEXT
    }

    pub fn is_empty_response(&self) -> bool {
        self.log.generated_text == EMPTY_RESPONSE_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_failure_is_zeroed() {
        let record = MetricsRecord::instruction_failure("question", "answer");

        assert_eq!(record.metrics, Metrics::default());
        assert_eq!(record.metrics.length, 0);
        assert!(record.is_instruction_failure());
        assert!(!record.is_empty_response());
        assert_eq!(record.log.question, "question");
        assert_eq!(record.log.reference_text, "answer");
    }

    #[test]
    fn test_serialized_keys() {
        let record = MetricsRecord::instruction_failure("q", "a");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["metrics"]["bleu-avg"], 0.0);
        assert_eq!(json["metrics"]["rouge-L"], 0.0);
        assert_eq!(json["metrics"]["semantic similarity"], 0.0);
        assert_eq!(json["metrics"]["length"], 0);
        assert_eq!(json["log"]["ground_truth_text"], "a");
        assert_eq!(json["log"]["generated_text"], INSTRUCTION_FAILURE_TEXT);
    }
}
