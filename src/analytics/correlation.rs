use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Pearson correlation over the common prefix of two series.
///
/// Fewer than two aligned points or a zero-variance side yields `0.0`.
#[must_use]
pub fn pearson(first: &[f64], second: &[f64]) -> f64 {
    let len = first.len().min(second.len());
    if len < 2 {
        return 0.0;
    }
    let (first, second) = (&first[..len], &second[..len]);
    let n = len as f64;
    let mean_a = first.iter().sum::<f64>() / n;
    let mean_b = second.iter().sum::<f64>() / n;

    let (mut covariance, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (a, b) in first.iter().zip(second) {
        let da = a - mean_a;
        let db = b - mean_b;
        covariance += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denominator = (var_a * var_b).sqrt();
    if !denominator.is_finite() || denominator == 0.0 {
        return 0.0;
    }
    let r = covariance / denominator;
    if r.is_finite() { r.clamp(-1.0, 1.0) } else { 0.0 }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongCorrelation {
    pub first: usize,
    pub second: usize,
    pub first_label: String,
    pub second_label: String,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major `labels.len() x labels.len()` coefficients, unit diagonal.
    pub values: Vec<Vec<f64>>,
    /// Pairs above the strength threshold, strongest first.
    pub strong: Vec<StrongCorrelation>,
}

impl CorrelationMatrix {
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get(row)?.get(column).copied()
    }
}

/// Pairwise Pearson matrix across labelled series.
#[must_use]
pub fn correlation_matrix(series: &[(String, Vec<f64>)], strong_threshold: f64) -> CorrelationMatrix {
    let size = series.len();
    let mut values = vec![vec![0.0; size]; size];
    let mut strong = Vec::new();

    for i in 0..size {
        values[i][i] = 1.0;
        for j in (i + 1)..size {
            let r = pearson(&series[i].1, &series[j].1);
            values[i][j] = r;
            values[j][i] = r;
            if r.abs() > strong_threshold {
                strong.push(StrongCorrelation {
                    first: i,
                    second: j,
                    first_label: series[i].0.clone(),
                    second_label: series[j].0.clone(),
                    coefficient: r,
                });
            }
        }
    }

    strong.sort_by_key(|pair| std::cmp::Reverse(OrderedFloat(pair.coefficient.abs())));

    CorrelationMatrix {
        labels: series.iter().map(|(label, _)| label.clone()).collect(),
        values,
        strong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pearson_truncates_to_shorter_series() {
        let r = pearson(&[1.0, 2.0, 3.0, 100.0], &[2.0, 4.0, 6.0]);
        assert!((r - 1.0).abs() <= 1e-12);
    }

    #[test]
    fn constant_series_has_zero_correlation() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
    }
}
