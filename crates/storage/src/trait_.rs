//! Storage trait abstraction.

use async_trait::async_trait;
use buildscope_core::{BuildMetric, MetricId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Selects the history window a report is built from.
#[derive(Debug, Clone, Default)]
pub struct MetricFilter {
    /// Only metrics from this branch
    pub branch: Option<String>,

    /// Only metrics with exactly these requested tasks (order-insensitive)
    pub requested_tasks: Option<Vec<String>>,

    /// Only metrics created at or after this time (epoch ms)
    pub since: Option<i64>,
}

impl MetricFilter {
    /// Whether `metric` falls inside this filter.
    pub fn matches(&self, metric: &BuildMetric) -> bool {
        if let Some(branch) = &self.branch {
            if &metric.branch != branch {
                return false;
            }
        }
        if let Some(tasks) = &self.requested_tasks {
            let mut wanted = tasks.clone();
            let mut actual = metric.requested_tasks.clone();
            wanted.sort();
            actual.sort();
            if wanted != actual {
                return false;
            }
        }
        if let Some(since) = self.since {
            if metric.created_at < since {
                return false;
            }
        }
        true
    }
}

/// Storage abstraction for build metrics.
///
/// This trait allows different storage backends to be plugged in.
#[async_trait]
pub trait MetricStore: Send + Sync {
    /// Save a metric (create or overwrite).
    async fn save_metric(&mut self, metric: &BuildMetric) -> Result<()>;

    /// Load a metric by ID.
    async fn load_metric(&self, id: MetricId) -> Result<Option<BuildMetric>>;

    /// List metrics matching the filter, oldest first.
    async fn list_metrics(&self, filter: &MetricFilter) -> Result<Vec<BuildMetric>>;

    /// Delete a metric.
    async fn delete_metric(&mut self, id: MetricId) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(branch: &str, tasks: &[&str], created_at: i64) -> BuildMetric {
        BuildMetric::new(branch, tasks.iter().map(|t| t.to_string()).collect(), created_at)
    }

    #[test]
    fn test_default_filter_matches_everything() {
        assert!(MetricFilter::default().matches(&metric("dev", &["a"], 0)));
    }

    #[test]
    fn test_filter_by_branch_and_since() {
        let filter = MetricFilter {
            branch: Some("main".to_string()),
            since: Some(100),
            ..Default::default()
        };
        assert!(filter.matches(&metric("main", &[], 100)));
        assert!(!filter.matches(&metric("main", &[], 99)));
        assert!(!filter.matches(&metric("dev", &[], 200)));
    }

    #[test]
    fn test_filter_tasks_ignores_order() {
        let filter = MetricFilter {
            requested_tasks: Some(vec!["test".to_string(), "assemble".to_string()]),
            ..Default::default()
        };
        assert!(filter.matches(&metric("main", &["assemble", "test"], 0)));
        assert!(!filter.matches(&metric("main", &["assemble"], 0)));
    }
}
