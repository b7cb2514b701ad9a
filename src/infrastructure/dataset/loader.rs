//! Dataset manifest loader

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{DatasetConfig, DatasetInfo, DomainError, GroundTruthItem};

pub const DEFAULT_MANIFEST_FILE: &str = "dataset_info.json";

/// Manifest entry as written on disk
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    /// Comma-separated document file names
    document_file: String,
    gt_file: String,
}

/// Reads `<root>/<manifest_file>` and every ground-truth file it names
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    root: PathBuf,
    manifest_file: String,
}

impl DatasetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
        }
    }

    pub fn with_manifest_file(mut self, manifest_file: impl Into<String>) -> Self {
        self.manifest_file = manifest_file.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest_file)
    }

    /// Load every dataset in manifest order. Any unreadable or malformed
    /// file aborts the whole load.
    pub async fn load(&self) -> Result<DatasetConfig, DomainError> {
        let manifest_path = self.manifest_path();
        // Map keeps insertion order, so multi-key objects load in file order
        let manifest: Vec<serde_json::Map<String, serde_json::Value>> =
            read_json(&manifest_path).await?;

        let mut datasets = Vec::new();
        for (name, value) in manifest.into_iter().flatten() {
            let entry: ManifestEntry = serde_json::from_value(value).map_err(|e| {
                DomainError::manifest(format!("Invalid manifest entry '{}': {}", name, e))
            })?;
            datasets.push(self.load_dataset(name, entry).await?);
        }

        info!(
            "Loaded {} datasets from {}",
            datasets.len(),
            manifest_path.display()
        );
        Ok(DatasetConfig::new(datasets))
    }

    async fn load_dataset(&self, name: String, entry: ManifestEntry) -> Result<DatasetInfo, DomainError> {
        let dataset_dir = self.root.join(&name);

        let document_files: Vec<PathBuf> = entry
            .document_file
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|f| dataset_dir.join(f))
            .collect();

        if document_files.is_empty() {
            return Err(DomainError::manifest(format!(
                "Dataset '{}' lists no document files",
                name
            )));
        }

        let ground_truth: Vec<GroundTruthItem> = read_json(&dataset_dir.join(&entry.gt_file)).await?;

        debug!(
            "Dataset '{}': {} documents, {} questions",
            name,
            document_files.len(),
            ground_truth.len()
        );

        Ok(DatasetInfo::new(name)
            .with_document_files(document_files)
            .with_ground_truth(ground_truth))
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DomainError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DomainError::manifest(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| DomainError::manifest(format!("Malformed {}: {}", path.display(), e)))
}
