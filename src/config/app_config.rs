use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::DomainError;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub benchmark: BenchmarkConfig,
    pub index: IndexSettings,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Dataset and result locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Directory holding the manifest and one subdirectory per dataset
    pub root: PathBuf,
    /// Directory under which `rag_faiss_<dataset>` indexes are persisted
    pub data_dir: PathBuf,
    pub manifest_file: String,
    pub result_file: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    pub top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub reuse_existing: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout_secs: u64,
    /// Proxy URL for both chat and embedding traffic
    pub proxy: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub base_url: String,
    pub model: String,
    /// Falls back to `llm.api_key` when unset
    pub api_key: Option<String>,
    pub dimensions: Option<usize>,
}

/// How answers are split into tokens for BLEU and ROUGE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Dictionary-based Chinese word segmentation
    #[default]
    Jieba,
    /// Unicode word boundaries, one token per CJK ideograph
    Unicode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub tokenizer: TokenizerKind,
    /// Cosine score at which two answers count as semantically equivalent
    pub similarity_threshold: f64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data/rag_bm"),
            data_dir: PathBuf::from("data"),
            manifest_file: "dataset_info.json".to_string(),
            result_file: "bm_result.json".to_string(),
        }
    }
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            top_k: 5,
            chunk_size: 1024,
            chunk_overlap: 0,
            reuse_existing: false,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            temperature: 0.0,
            max_tokens: None,
            timeout_secs: 120,
            proxy: None,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "text-embedding-ada-002".to_string(),
            api_key: None,
            dimensions: None,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerKind::default(),
            similarity_threshold: 0.8,
        }
    }
}

impl LlmConfig {
    pub fn require_api_key(&self) -> Result<&str, DomainError> {
        non_empty(self.api_key.as_deref())
            .ok_or_else(|| DomainError::configuration("llm.api_key is not set (APP__LLM__API_KEY)"))
    }
}

impl EmbeddingConfig {
    /// The embedding key, or the chat key when none is configured
    pub fn resolve_api_key<'a>(&'a self, llm: &'a LlmConfig) -> Result<&'a str, DomainError> {
        match non_empty(self.api_key.as_deref()) {
            Some(key) => Ok(key),
            None => llm.require_api_key(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
