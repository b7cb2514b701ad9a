mod app_config;

pub use app_config::{
    AppConfig, BenchmarkConfig, EmbeddingConfig, IndexSettings, LlmConfig, LogFormat,
    LoggingConfig, ScoringConfig, TokenizerKind,
};
