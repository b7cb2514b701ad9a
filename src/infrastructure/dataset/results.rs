//! Per-dataset result files

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::domain::{DomainError, MetricsRecord};

/// Write records as a pretty-printed JSON array, creating parent directories
pub async fn persist_results(path: &Path, records: &[MetricsRecord]) -> Result<(), DomainError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            DomainError::storage(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut serializer)
        .map_err(|e| DomainError::storage(format!("Failed to serialize results: {}", e)))?;

    tokio::fs::write(path, buf)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to write {}: {}", path.display(), e)))?;

    info!("Wrote {} results to {}", records.len(), path.display());
    Ok(())
}

pub async fn load_results(path: &Path) -> Result<Vec<MetricsRecord>, DomainError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| DomainError::storage(format!("Malformed {}: {}", path.display(), e)))
}
