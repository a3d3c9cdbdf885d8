//! Report generator - runs every report stage over a metric history.

use buildscope_core::{Report, ReportIdentity};
use tracing::info;

use crate::history::MetricHistory;
use crate::stages::{
    CacheHitReportStage, ModulesExecutionReportStage, ModulesSourceCountReportStage,
    ParallelRateReportStage, ProcessKind, ProcessReportStage, SuccessRateReportStage,
};
use crate::{Pipeline, ReportConfig, Result};

/// Builds reports from build history.
///
/// ```text
/// history → phases → cache hit → success rate → parallelism → modules → Report
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a generator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration, rejecting unusable values.
    pub fn with_config(mut self, config: ReportConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// The report pipeline over `history`, in execution order.
    pub fn pipeline<'a>(&self, history: &'a MetricHistory) -> Pipeline<'a, Report> {
        let config = self.config;
        let mut pipeline = Pipeline::new("report");
        for kind in ProcessKind::ALL {
            pipeline.push(Box::new(ProcessReportStage::new(kind, history, config)));
        }
        pipeline
            .stage(CacheHitReportStage::new(history, config))
            .stage(SuccessRateReportStage::new(history, config))
            .stage(ParallelRateReportStage::new(history, config))
            .stage(ModulesSourceCountReportStage::new(history))
            .stage(ModulesExecutionReportStage::new(history, config))
    }

    /// Generate the report for `identity` from `history`.
    pub fn generate(&self, identity: ReportIdentity, history: &MetricHistory) -> Result<Report> {
        info!(
            "Generating report for {} {:?} from {} metrics",
            identity.branch,
            identity.requested_tasks,
            history.len()
        );

        let report = self.pipeline(history).run(Report::new(identity))?;

        if report.is_empty() {
            info!("No metric data available, report is empty");
        }
        Ok(report)
    }
}
