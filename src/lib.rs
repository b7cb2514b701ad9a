//! RAG Benchmark
//!
//! Evaluates a retrieval-augmented generation engine against ground-truth
//! datasets. Each question is answered by the engine and scored with BLEU,
//! ROUGE-L, embedding similarity and exact-passage recall; per-dataset
//! results and summaries are written next to the dataset.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use crate::config::TokenizerKind;
use domain::embedding::EmbeddingProvider;
use domain::scoring::Tokenizer;
use domain::LlmProvider;
use infrastructure::dataset::DatasetLoader;
use infrastructure::embedding::OpenAiEmbeddingProvider;
use infrastructure::llm::{HttpClient, OpenAiProvider};
use infrastructure::retrieval::{EngineSettings, VectorEngineFactory};
use infrastructure::scoring::{
    EmbeddingSemanticEvaluator, JiebaTokenizer, LcsRougeScorer, NgramBleuScorer,
    UnicodeWordTokenizer,
};
use infrastructure::services::{BenchmarkRunner, EvaluationPipeline, PipelineSettings};

fn http_client(config: &AppConfig) -> anyhow::Result<HttpClient> {
    Ok(HttpClient::with_options(
        Duration::from_secs(config.llm.timeout_secs),
        config.llm.proxy.as_deref(),
    )?)
}

fn create_embedding_provider(config: &AppConfig) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    let api_key = config.embedding.resolve_api_key(&config.llm)?;

    Ok(Arc::new(OpenAiEmbeddingProvider::with_base_url(
        http_client(config)?,
        api_key,
        config.embedding.base_url.as_str(),
    )))
}

fn create_llm_provider(config: &AppConfig) -> anyhow::Result<Arc<dyn LlmProvider>> {
    let api_key = config.llm.require_api_key()?;

    Ok(Arc::new(OpenAiProvider::with_base_url(
        http_client(config)?,
        api_key,
        config.llm.base_url.as_str(),
    )))
}

fn create_tokenizer(kind: TokenizerKind) -> Arc<dyn Tokenizer> {
    match kind {
        TokenizerKind::Jieba => Arc::new(JiebaTokenizer::new()),
        TokenizerKind::Unicode => Arc::new(UnicodeWordTokenizer::new()),
    }
}

fn runner_with_embedder(
    config: &AppConfig,
    embedder: Arc<dyn EmbeddingProvider>,
) -> BenchmarkRunner {
    let semantic = EmbeddingSemanticEvaluator::new(embedder, config.embedding.model.as_str())
        .with_dimensions(config.embedding.dimensions)
        .with_threshold(config.scoring.similarity_threshold);

    BenchmarkRunner::new(
        create_tokenizer(config.scoring.tokenizer),
        Arc::new(NgramBleuScorer::new()),
        Arc::new(LcsRougeScorer::new()),
        Arc::new(semantic),
    )
}

/// Runner with the bundled scorers
pub fn create_runner_with_config(config: &AppConfig) -> anyhow::Result<BenchmarkRunner> {
    let embedder = create_embedding_provider(config)?;
    Ok(runner_with_embedder(config, embedder))
}

/// Pipeline over the configured benchmark root with the bundled engine
pub fn create_pipeline_with_config(config: &AppConfig) -> anyhow::Result<EvaluationPipeline> {
    let embedder = create_embedding_provider(config)?;
    let llm = create_llm_provider(config)?;

    let engine_settings =
        EngineSettings::new(config.embedding.model.as_str(), config.llm.model.as_str())
            .with_embedding_dimensions(config.embedding.dimensions)
            .with_temperature(config.llm.temperature)
            .with_max_tokens(config.llm.max_tokens);
    let factory = VectorEngineFactory::new(embedder.clone(), llm, engine_settings);

    let loader = DatasetLoader::new(config.benchmark.root.clone())
        .with_manifest_file(config.benchmark.manifest_file.as_str());

    let settings = PipelineSettings {
        data_dir: config.benchmark.data_dir.clone(),
        result_file: config.benchmark.result_file.clone(),
        top_k: config.index.top_k,
        chunk_size: config.index.chunk_size,
        chunk_overlap: config.index.chunk_overlap,
        reuse_existing: config.index.reuse_existing,
    };

    Ok(EvaluationPipeline::new(
        loader,
        Arc::new(factory),
        runner_with_embedder(config, embedder),
        settings,
    ))
}
