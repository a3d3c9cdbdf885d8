//! JSON file storage implementation.
//!
//! Stores one pretty-printed JSON file per metric under `<root>/metrics`.

use std::path::{Path, PathBuf};
use buildscope_core::{BuildMetric, MetricId};
use super::{MetricFilter, MetricStore, StorageError, Result};
use tokio::fs;
use tracing::{debug, warn};

/// File-based JSON storage backend.
pub struct JsonMetricStore {
    root: PathBuf,
}

impl JsonMetricStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("metrics")).await?;
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn metric_path(&self, id: MetricId) -> PathBuf {
        self.root.join("metrics").join(format!("{}.json", id))
    }
}

#[async_trait::async_trait]
impl MetricStore for JsonMetricStore {
    async fn save_metric(&mut self, metric: &BuildMetric) -> Result<()> {
        let path = self.metric_path(metric.id);
        let json = serde_json::to_string_pretty(metric)?;
        fs::write(&path, json.as_bytes()).await?;
        debug!("Saved metric {} to {}", metric.id, path.display());
        Ok(())
    }

    async fn load_metric(&self, id: MetricId) -> Result<Option<BuildMetric>> {
        read_json(&self.metric_path(id)).await
    }

    async fn list_metrics(&self, filter: &MetricFilter) -> Result<Vec<BuildMetric>> {
        let all: Vec<BuildMetric> = list_dir(&self.root.join("metrics")).await?;
        let mut metrics: Vec<BuildMetric> = all.into_iter().filter(|m| filter.matches(m)).collect();
        metrics.sort_by_key(|m| (m.created_at, m.id));
        debug!("Listed {} metrics", metrics.len());
        Ok(metrics)
    }

    async fn delete_metric(&mut self, id: MetricId) -> Result<()> {
        let path = self.metric_path(id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(format!("metric {}", id)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(items),
        Err(e) => return Err(e.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match read_json(&path).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(StorageError::Json(e)) => {
                warn!("Skipping unreadable metric file {}: {}", path.display(), e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(items)
}
