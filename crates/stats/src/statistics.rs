//! Median, mean and percentage helpers shared by every metric family.

/// Round a value to `decimals` decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Median of integer values, `0` when empty.
///
/// For an even count the two middle elements are averaged with integer
/// division.
pub fn median(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    midpoint(sorted[n / 2], sorted[(n - 1) / 2])
}

fn midpoint(a: i64, b: i64) -> i64 {
    // The midpoint of two i64 values always fits in i64.
    ((a as i128 + b as i128) / 2) as i64
}

/// Median of float values, `0.0` when empty.
pub fn median_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    (sorted[n / 2] + sorted[(n - 1) / 2]) / 2.0
}

/// Integer mean, `0` when empty.
pub fn mean(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let sum: i128 = values.iter().map(|&v| v as i128).sum();
    (sum / values.len() as i128) as i64
}

/// Sum of `values`, clamped to the `i64` range.
pub fn saturating_sum<I>(values: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    values.into_iter().fold(0i64, i64::saturating_add)
}

/// Float mean, `0.0` when empty.
pub fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentage change from `base` to `target`, rounded to 2 decimals.
///
/// Returns `None` when `base` is zero.
pub fn diff_percentage_of(base: i64, target: i64) -> Option<f64> {
    if base == 0 {
        return None;
    }
    let diff = (target as f64 - base as f64) / base as f64 * 100.0;
    Some(round_to(diff, 2))
}

/// `part` as a percentage of `whole`, rounded to 2 decimals. `0.0` when
/// `whole` is zero.
pub fn to_percentage_of(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, 2)
}

/// `value` increased by `percentage` percent.
pub fn sum_with_percentage(value: i64, percentage: i64) -> i64 {
    value.saturating_add(value.saturating_mul(percentage) / 100)
}

/// `value` decreased by `percentage` percent.
pub fn deduct_with_percentage(value: i64, percentage: i64) -> i64 {
    value.saturating_sub(value.saturating_mul(percentage) / 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[100, 200, 300, 450, 340]), 300);
    }

    #[test]
    fn test_median_even_averages_middle_pair() {
        assert_eq!(median(&[4, 1, 3, 2]), 2);
        assert_eq!(median(&[10, 20]), 15);
        assert_eq!(median_f64(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_median_empty_is_zero() {
        assert_eq!(median(&[]), 0);
        assert_eq!(median_f64(&[]), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[100, 200, 300, 450, 340]), 278);
        assert_eq!(mean(&[]), 0);
        assert_eq!(mean_f64(&[1.0, 2.0]), 1.5);
        assert_eq!(mean_f64(&[]), 0.0);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        assert_eq!(median(&[i64::MAX, i64::MAX]), i64::MAX);
        assert_eq!(median(&[i64::MIN, i64::MIN, 0, 0]), i64::MIN / 2);
        assert_eq!(mean(&[i64::MAX, i64::MAX, i64::MAX]), i64::MAX);
        assert_eq!(mean(&[i64::MAX, i64::MIN]), 0);
    }

    #[test]
    fn test_saturating_sum() {
        assert_eq!(saturating_sum([1, 2, 3]), 6);
        assert_eq!(saturating_sum(Vec::new()), 0);
        assert_eq!(saturating_sum([i64::MAX, 1]), i64::MAX);
    }

    #[test]
    fn test_diff_percentage_of() {
        assert_eq!(diff_percentage_of(400, 589), Some(47.25));
        assert_eq!(diff_percentage_of(128, 256), Some(100.0));
        assert_eq!(diff_percentage_of(200, 100), Some(-50.0));
    }

    #[test]
    fn test_diff_percentage_of_zero_base_is_unavailable() {
        assert_eq!(diff_percentage_of(0, 10), None);
        assert_eq!(diff_percentage_of(0, 0), None);
    }

    #[test]
    fn test_to_percentage_of() {
        assert_eq!(to_percentage_of(5, 62), 8.06);
        assert_eq!(to_percentage_of(1, 4), 25.0);
        assert_eq!(to_percentage_of(3, 0), 0.0);
    }

    #[test]
    fn test_axis_padding() {
        assert_eq!(sum_with_percentage(1000, 30), 1300);
        assert_eq!(deduct_with_percentage(1000, 30), 700);
        assert_eq!(sum_with_percentage(0, 30), 0);
        assert_eq!(deduct_with_percentage(5, 30), 4);
    }
}
