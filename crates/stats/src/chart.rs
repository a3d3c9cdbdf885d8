//! Mapping of aggregated points to labelled chart points.

use buildscope_core::{ChartPoint, TimespanPoint};
use chrono::{DateTime, Utc};

use crate::{Result, StatsError};

const LABEL_FORMAT: &str = "%d/%m";

/// Format an epoch-millisecond timestamp as a `dd/MM` label in UTC.
pub fn format_day(epoch_ms: i64) -> Result<String> {
    let time: DateTime<Utc> =
        DateTime::from_timestamp_millis(epoch_ms).ok_or(StatsError::InvalidTimestamp(epoch_ms))?;
    Ok(time.format(LABEL_FORMAT).to_string())
}

/// Convert a point into a chart point labelled with its date or date range.
pub fn to_chart_point(point: &TimespanPoint) -> Result<ChartPoint> {
    let description = match point.to {
        Some(to) => format!("{}-{}", format_day(point.from)?, format_day(to)?),
        None => format_day(point.from)?,
    };
    Ok(ChartPoint {
        value: point.value,
        description,
    })
}

/// Convert a whole series, failing on the first unrepresentable timestamp.
pub fn to_chart_points(points: &[TimespanPoint]) -> Result<Vec<ChartPoint>> {
    points.iter().map(to_chart_point).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2022-10-12T00:00:00Z
    const OCT_12: i64 = 1_665_532_800_000;
    const DAY: i64 = 86_400_000;

    #[test]
    fn test_single_point_label() {
        let point = to_chart_point(&TimespanPoint::single(42, OCT_12)).unwrap();
        assert_eq!(point.value, 42);
        assert_eq!(point.description, "12/10");
    }

    #[test]
    fn test_merged_point_label() {
        let point = TimespanPoint { value: 7, from: OCT_12, to: Some(OCT_12 + DAY) };
        assert_eq!(to_chart_point(&point).unwrap().description, "12/10-13/10");
    }

    #[test]
    fn test_label_is_utc() {
        // One millisecond before midnight still belongs to the 11th.
        assert_eq!(format_day(OCT_12 - 1).unwrap(), "11/10");
    }

    #[test]
    fn test_unrepresentable_timestamp_fails() {
        let err = to_chart_point(&TimespanPoint::single(1, i64::MAX)).unwrap_err();
        assert!(matches!(err, StatsError::InvalidTimestamp(i64::MAX)));
    }
}
