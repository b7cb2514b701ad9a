//! Infrastructure layer - provider clients, scorers, storage and services

pub mod dataset;
pub mod embedding;
pub mod llm;
pub mod logging;
pub mod retrieval;
pub mod scoring;
pub mod services;
