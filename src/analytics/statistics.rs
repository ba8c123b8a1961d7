use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Summary statistics of one series. Variance and standard deviation are
/// population figures; `kurtosis` is excess kurtosis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescriptiveStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Every value sharing the highest frequency, in first-seen order.
    pub mode: Vec<f64>,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    /// Values outside `[q1 - 1.5 * iqr, q3 + 1.5 * iqr]`, in input order.
    pub outliers: Vec<f64>,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// Computes descriptive statistics; non-finite values are ignored and an
/// empty input yields the all-zero default.
#[must_use]
pub fn describe(values: &[f64]) -> DescriptiveStatistics {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return DescriptiveStatistics::default();
    }

    let count = values.len();
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;

    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) * 0.5
    } else {
        sorted[count / 2]
    };
    let min = sorted[0];
    let max = sorted[count - 1];

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let q1 = sorted[(n * 0.25).floor() as usize];
    let q3 = sorted[(n * 0.75).floor() as usize];
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;
    let outliers = values
        .iter()
        .copied()
        .filter(|v| *v < lower_fence || *v > upper_fence)
        .collect();

    let (skewness, kurtosis) = if std_dev > 0.0 {
        let (third, fourth) = values.iter().fold((0.0, 0.0), |(third, fourth), v| {
            let z = (v - mean) / std_dev;
            (third + z.powi(3), fourth + z.powi(4))
        });
        (third / n, fourth / n - 3.0)
    } else {
        (0.0, 0.0)
    };

    DescriptiveStatistics {
        count,
        mean,
        median,
        mode: modes(&values),
        variance,
        std_dev,
        min,
        max,
        range: max - min,
        q1,
        q3,
        iqr,
        outliers,
        skewness,
        kurtosis,
    }
}

fn modes(values: &[f64]) -> Vec<f64> {
    let mut frequencies: IndexMap<OrderedFloat<f64>, usize> = IndexMap::new();
    for value in values {
        *frequencies.entry(OrderedFloat(*value)).or_insert(0) += 1;
    }
    let top = frequencies.values().copied().max().unwrap_or(0);
    frequencies
        .into_iter()
        .filter(|(_, count)| *count == top)
        .map(|(value, _)| value.into_inner())
        .collect()
}

/// Arithmetic mean of finite values, `0.0` when there are none.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_reports_all_ties() {
        assert_eq!(modes(&[1.0, 2.0, 2.0, 3.0, 3.0]), vec![2.0, 3.0]);
    }

    #[test]
    fn mean_skips_non_finite() {
        assert_eq!(mean(&[1.0, f64::NAN, 3.0]), 2.0);
        assert_eq!(mean(&[]), 0.0);
    }
}
