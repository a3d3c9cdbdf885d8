//! Report configuration.

use serde::{Deserialize, Serialize};

use crate::{ReportError, Result};

/// Default number of chart columns.
pub const DEFAULT_COLUMN_BUDGET: usize = 12;

/// Default threshold below which execution samples are treated as noise.
pub const DEFAULT_NOISE_THRESHOLD_MS: i64 = 50;

/// Default padding applied to chart axis bounds.
pub const DEFAULT_AXIS_PADDING_PERCENTAGE: i64 = 30;

/// Configuration shared by every report stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Maximum number of points per chart series
    pub column_budget: usize,
    /// Execution samples with a median below this are skipped (ms)
    pub noise_threshold_ms: i64,
    /// Padding added above and below chart values (percent)
    pub axis_padding_percentage: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            column_budget: DEFAULT_COLUMN_BUDGET,
            noise_threshold_ms: DEFAULT_NOISE_THRESHOLD_MS,
            axis_padding_percentage: DEFAULT_AXIS_PADDING_PERCENTAGE,
        }
    }
}

impl ReportConfig {
    /// Check that the values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.column_budget == 0 {
            return Err(ReportError::Config("column_budget must be at least 1".to_string()));
        }
        if self.noise_threshold_ms < 0 {
            return Err(ReportError::Config("noise_threshold_ms must not be negative".to_string()));
        }
        if self.axis_padding_percentage < 0 {
            return Err(ReportError::Config(
                "axis_padding_percentage must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
