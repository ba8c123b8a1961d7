use serde::{Deserialize, Serialize};

use super::correlation::pearson;

/// `|slope|` below this is reported as stable.
pub const STABLE_SLOPE_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub slope: f64,
    pub intercept: f64,
    pub correlation: f64,
    pub r_squared: f64,
    pub direction: TrendDirection,
    /// Fitted line extrapolated past the last index.
    pub forecast: Vec<f64>,
}

/// Ordinary least squares of value against index.
#[must_use]
pub fn analyze_trend(values: &[f64], horizon: usize) -> TrendAnalysis {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.len() < 2 {
        return TrendAnalysis::default();
    }

    let n = values.len() as f64;
    let indices: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    let sum_x: f64 = indices.iter().sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = indices.iter().zip(&values).map(|(x, y)| x * y).sum();
    let sum_xx: f64 = indices.iter().map(|x| x * x).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    let slope = if denominator == 0.0 {
        0.0
    } else {
        (n * sum_xy - sum_x * sum_y) / denominator
    };
    let intercept = (sum_y - slope * sum_x) / n;
    let correlation = pearson(&indices, &values);

    let direction = if slope.abs() < STABLE_SLOPE_THRESHOLD {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    let forecast = (values.len()..values.len() + horizon)
        .map(|i| slope * i as f64 + intercept)
        .collect();

    TrendAnalysis {
        slope,
        intercept,
        correlation,
        r_squared: correlation * correlation,
        direction,
        forecast,
    }
}
