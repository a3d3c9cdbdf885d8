//! Pairwise-averaging downsampler for chart series.

use buildscope_core::TimespanPoint;

use crate::statistics::mean;

/// Compress `points` until at most `target_size` remain.
///
/// Each pass merges neighbours left to right: the value becomes the mean of
/// the pair and the range runs from the first point's start to the second
/// point's end. An odd trailing point is carried over untouched. A target of
/// zero is treated as one.
pub fn downsample(points: Vec<TimespanPoint>, target_size: usize) -> Vec<TimespanPoint> {
    let target_size = target_size.max(1);
    let mut current = points;
    while current.len() > target_size {
        current = halve(&current);
    }
    current
}

fn halve(points: &[TimespanPoint]) -> Vec<TimespanPoint> {
    points
        .chunks(2)
        .map(|pair| match pair {
            [first, second] => TimespanPoint {
                value: mean(&[first.value, second.value]),
                from: first.from,
                to: Some(second.end()),
            },
            _ => pair[0],
        })
        .collect()
}
