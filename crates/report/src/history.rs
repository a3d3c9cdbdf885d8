//! Historical metrics and the chart series derived from them.

use buildscope_core::{BuildMetric, ChartPoint, TimespanPoint};
use buildscope_stats::{
    deduct_with_percentage, diff_percentage_of, downsample, sum_with_percentage, to_chart_points,
};

use crate::Result;

/// The history a report is built from, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MetricHistory {
    metrics: Vec<BuildMetric>,
}

impl MetricHistory {
    /// Wrap `metrics`, ordering them by creation time.
    pub fn new(mut metrics: Vec<BuildMetric>) -> Self {
        metrics.sort_by_key(|m| m.created_at);
        Self { metrics }
    }

    /// All metrics, oldest first.
    pub fn metrics(&self) -> &[BuildMetric] {
        &self.metrics
    }

    /// Number of metrics.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Extract one timestamped value per metric that carries it.
    pub fn samples<F>(&self, select: F) -> Vec<Sample>
    where
        F: Fn(&BuildMetric) -> Option<i64>,
    {
        self.metrics
            .iter()
            .filter_map(|m| select(m).map(|value| Sample::new(m.created_at, value)))
            .collect()
    }
}

/// A value observed at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Creation time of the metric (epoch ms)
    pub at: i64,
    /// Observed value
    pub value: i64,
}

impl Sample {
    /// Create a sample.
    pub fn new(at: i64, value: i64) -> Self {
        Self { at, value }
    }
}

/// Downsample `samples` to `column_budget` points and label them.
pub fn chart_series(samples: &[Sample], column_budget: usize) -> Result<Vec<ChartPoint>> {
    let points = samples
        .iter()
        .map(|s| TimespanPoint::single(s.value, s.at))
        .collect();
    Ok(to_chart_points(&downsample(points, column_budget))?)
}

/// Change between the first and last sample; absent with fewer than two
/// samples or a zero baseline.
pub fn diff_rate(samples: &[Sample]) -> Option<f64> {
    match samples {
        [first, .., last] => diff_percentage_of(first.value, last.value),
        _ => None,
    }
}

/// Padded `(max, min)` axis bounds over every plotted value.
pub fn axis_bounds<'a, I>(series: I, padding_percentage: i64) -> (i64, i64)
where
    I: IntoIterator<Item = &'a ChartPoint>,
{
    let mut max = i64::MIN;
    let mut min = i64::MAX;
    for point in series {
        max = max.max(point.value);
        min = min.min(point.value);
    }
    if max < min {
        return (0, 0);
    }
    (
        sum_with_percentage(max, padding_percentage),
        deduct_with_percentage(min, padding_percentage),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400_000;
    // 2022-10-12T00:00:00Z
    const OCT_12: i64 = 1_665_532_800_000;

    #[test]
    fn test_history_is_sorted_oldest_first() {
        let history = MetricHistory::new(vec![
            BuildMetric::new("main", vec![], 30),
            BuildMetric::new("main", vec![], 10),
            BuildMetric::new("main", vec![], 20),
        ]);
        let times: Vec<i64> = history.metrics().iter().map(|m| m.created_at).collect();
        assert_eq!(times, vec![10, 20, 30]);
    }

    #[test]
    fn test_samples_skip_missing_values() {
        let history = MetricHistory::new(vec![
            BuildMetric::new("main", vec![], 1),
            BuildMetric::new("other", vec![], 2),
        ]);
        let samples = history.samples(|m| (m.branch == "main").then_some(5));
        assert_eq!(samples, vec![Sample::new(1, 5)]);
    }

    #[test]
    fn test_chart_series_is_bounded_and_labelled() {
        let samples: Vec<Sample> = (0..30).map(|i| Sample::new(OCT_12 + i * DAY, i)).collect();
        let series = chart_series(&samples, 12).unwrap();
        assert!(series.len() <= 12);
        assert!(series[0].description.starts_with("12/10-"));
    }

    #[test]
    fn test_chart_series_single_sample() {
        let series = chart_series(&[Sample::new(OCT_12, 9)], 12).unwrap();
        assert_eq!(series, vec![ChartPoint { value: 9, description: "12/10".to_string() }]);
    }

    #[test]
    fn test_diff_rate() {
        assert_eq!(diff_rate(&[]), None);
        assert_eq!(diff_rate(&[Sample::new(1, 128)]), None);
        assert_eq!(diff_rate(&[Sample::new(1, 128), Sample::new(2, 256)]), Some(100.0));
        assert_eq!(
            diff_rate(&[Sample::new(1, 400), Sample::new(2, 1), Sample::new(3, 589)]),
            Some(47.25)
        );
        assert_eq!(diff_rate(&[Sample::new(1, 0), Sample::new(2, 5)]), None);
    }

    #[test]
    fn test_axis_bounds() {
        let series = vec![
            ChartPoint { value: 100, description: String::new() },
            ChartPoint { value: 1000, description: String::new() },
        ];
        assert_eq!(axis_bounds(&series, 30), (1300, 70));
        assert_eq!(axis_bounds(&Vec::<ChartPoint>::new(), 30), (0, 0));
    }
}
