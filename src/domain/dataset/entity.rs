//! Dataset manifest entities

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One ground-truth question with its reference passage and answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruthItem {
    pub question: String,
    /// Passage the retriever is expected to return verbatim
    #[serde(rename = "gt_reference")]
    pub reference_passage: String,
    #[serde(rename = "gt_answer")]
    pub reference_answer: String,
}

impl GroundTruthItem {
    pub fn new(
        question: impl Into<String>,
        reference_passage: impl Into<String>,
        reference_answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            reference_passage: reference_passage.into(),
            reference_answer: reference_answer.into(),
        }
    }
}

/// A named benchmark dataset: the documents to index and the questions to ask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    pub name: String,
    pub document_files: Vec<PathBuf>,
    pub ground_truth: Vec<GroundTruthItem>,
}

impl DatasetInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document_files: Vec::new(),
            ground_truth: Vec::new(),
        }
    }

    pub fn with_document_files(mut self, files: Vec<PathBuf>) -> Self {
        self.document_files = files;
        self
    }

    pub fn with_ground_truth(mut self, items: Vec<GroundTruthItem>) -> Self {
        self.ground_truth = items;
        self
    }
}

/// All datasets declared by a manifest, in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetConfig {
    pub datasets: Vec<DatasetInfo>,
}

impl DatasetConfig {
    pub fn new(datasets: Vec<DatasetInfo>) -> Self {
        Self { datasets }
    }

    pub fn names(&self) -> Vec<&str> {
        self.datasets.iter().map(|d| d.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_truth_uses_manifest_keys() {
        let json = r#"{"question": "q", "gt_reference": "passage", "gt_answer": "answer"}"#;
        let item: GroundTruthItem = serde_json::from_str(json).unwrap();

        assert_eq!(item, GroundTruthItem::new("q", "passage", "answer"));
    }

    #[test]
    fn test_dataset_config_names() {
        let config = DatasetConfig::new(vec![DatasetInfo::new("travel"), DatasetInfo::new("news")]);
        assert_eq!(config.names(), vec!["travel", "news"]);
    }
}
