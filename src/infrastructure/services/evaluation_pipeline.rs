//! Drives the retrieval engine over benchmark datasets and aggregates scores

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::benchmark_runner::BenchmarkRunner;
use crate::domain::{
    BenchmarkSummary, DatasetInfo, DatasetSelection, DomainError, EngineFactory, GeneratedAnswer,
    GroundTruthItem, IndexConfig, MetricsRecord, RetrievalEngine, ScoredPassage,
};
use crate::infrastructure::dataset::{persist_results, DatasetLoader};

const PREVIEW_CHARS: usize = 10;

/// Where indexes and results go, and how indexes are built
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Parent directory of the per-dataset `rag_faiss_<name>` indexes
    pub data_dir: PathBuf,
    pub result_file: String,
    pub top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    /// Load a persisted index instead of rebuilding it
    pub reuse_existing: bool,
}

impl PipelineSettings {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            result_file: "bm_result.json".to_string(),
            top_k: 5,
            chunk_size: 1024,
            chunk_overlap: 0,
            reuse_existing: false,
        }
    }

    pub fn index_config(&self, dataset_name: &str) -> IndexConfig {
        IndexConfig::new(self.data_dir.join(format!("rag_faiss_{}", dataset_name)))
            .with_top_k(self.top_k)
            .with_chunking(self.chunk_size, self.chunk_overlap)
    }
}

/// Outcome of evaluating one dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetReport {
    pub dataset: String,
    pub result_path: PathBuf,
    pub records: Vec<MetricsRecord>,
    pub summary: Option<BenchmarkSummary>,
}

/// Retrieval or generation failed for one question
#[derive(Debug, Error)]
enum EvaluationFailure {
    #[error("retrieval failed: {0}")]
    Retrieval(DomainError),
    #[error("generation failed: {0}")]
    Generation(DomainError),
}

pub struct EvaluationPipeline {
    loader: DatasetLoader,
    factory: Arc<dyn EngineFactory>,
    runner: BenchmarkRunner,
    settings: PipelineSettings,
}

impl EvaluationPipeline {
    pub fn new(
        loader: DatasetLoader,
        factory: Arc<dyn EngineFactory>,
        runner: BenchmarkRunner,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            loader,
            factory,
            runner,
            settings,
        }
    }

    /// Evaluate every selected dataset in manifest order, writing
    /// `<root>/<dataset>/<result_file>` for each.
    pub async fn run(
        &self,
        selection: &DatasetSelection,
    ) -> Result<Vec<DatasetReport>, DomainError> {
        let config = self.loader.load().await?;

        if let DatasetSelection::Named(names) = selection {
            for name in names {
                if !config.names().contains(&name.as_str()) {
                    warn!("Dataset '{}' is not in the manifest", name);
                }
            }
        }

        let mut reports = Vec::new();
        for dataset in config.datasets.iter().filter(|d| selection.includes(&d.name)) {
            reports.push(self.run_dataset(dataset).await?);
        }

        Ok(reports)
    }

    async fn run_dataset(&self, dataset: &DatasetInfo) -> Result<DatasetReport, DomainError> {
        let engine = self.open_engine(dataset).await?;

        let mut records = Vec::with_capacity(dataset.ground_truth.len());
        for item in &dataset.ground_truth {
            records.push(self.evaluate_one(engine.as_ref(), item).await?);
        }

        info!(
            "=====The {} BenchMark dataset assessment is complete!=====",
            dataset.name
        );

        let summary = BenchmarkSummary::from_records(&records);
        match &summary {
            Some(summary) => log_summary(summary),
            None => warn!("Dataset '{}' produced no results", dataset.name),
        }

        let result_path = self
            .loader
            .root()
            .join(&dataset.name)
            .join(&self.settings.result_file);
        persist_results(&result_path, &records).await?;

        Ok(DatasetReport {
            dataset: dataset.name.clone(),
            result_path,
            records,
            summary,
        })
    }

    async fn open_engine(
        &self,
        dataset: &DatasetInfo,
    ) -> Result<Arc<dyn RetrievalEngine>, DomainError> {
        let index_config = self.settings.index_config(&dataset.name);

        if self.settings.reuse_existing && self.factory.index_exists(&index_config) {
            info!(
                "Loading index for '{}' from {}",
                dataset.name,
                index_config.persist_path().display()
            );
            return self.factory.load_index(&index_config).await;
        }

        info!(
            "Building index for '{}' from {} documents",
            dataset.name,
            dataset.document_files.len()
        );
        self.factory
            .build_index(&dataset.document_files, &index_config)
            .await
    }

    /// Retrieve, generate and score one question. A retrieval or
    /// generation failure yields the zeroed instruction-failure record;
    /// scorer errors are returned.
    pub async fn evaluate_one(
        &self,
        engine: &dyn RetrievalEngine,
        item: &GroundTruthItem,
    ) -> Result<MetricsRecord, DomainError> {
        print_title("RAG Pipeline");

        let (passages, answer) = match retrieve_and_generate(engine, &item.question).await {
            Ok(outcome) => outcome,
            Err(failure) => {
                warn!("Question '{}': {}", item.question, failure);
                return Ok(MetricsRecord::instruction_failure(
                    &item.question,
                    &item.reference_answer,
                ));
            }
        };

        let mut record = self
            .runner
            .evaluate(
                &answer.text,
                &item.reference_answer,
                &passages,
                &item.reference_passage,
            )
            .await?;
        record.log.question = item.question.clone();

        info!("==========RAG BenchMark result demo as follows==========");
        info!("{:?}", record);

        Ok(record)
    }
}

async fn retrieve_and_generate(
    engine: &dyn RetrievalEngine,
    question: &str,
) -> Result<(Vec<ScoredPassage>, GeneratedAnswer), EvaluationFailure> {
    let passages = engine
        .retrieve(question)
        .await
        .map_err(EvaluationFailure::Retrieval)?;
    log_retrieved(&passages);

    let answer = engine
        .generate(question)
        .await
        .map_err(EvaluationFailure::Generation)?;
    info!("Query Result:");
    info!("{}\n", answer.text);

    Ok((passages, answer))
}

fn print_title(title: &str) {
    let bar = "#".repeat(30);
    info!("{} {} {}", bar, title, bar);
}

fn log_retrieved(passages: &[ScoredPassage]) {
    info!("Retrieve Result:");
    for (i, passage) in passages.iter().enumerate() {
        info!("{}. {}..., {}", i, passage.preview(PREVIEW_CHARS), passage.score);
    }
    info!("======Retrieve Finished======");
}

fn log_summary(summary: &BenchmarkSummary) {
    info!("\n {}", summary);
    info!(
        "Percentage of retrieval failures due to incorrect LLM instruction following: {}%",
        summary.llm_error_pct
    );
    info!(
        "Percentage of retrieval failures due to retriever not recalling any documents is: {}%",
        summary.retrieve_error_pct
    );
}
