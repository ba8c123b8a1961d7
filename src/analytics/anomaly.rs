use serde::{Deserialize, Serialize};

pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    Low,
    Medium,
    High,
}

impl AnomalySeverity {
    /// High above twice the threshold, medium above one and a half times.
    #[must_use]
    pub fn classify(z_score: f64, threshold: f64) -> Self {
        let magnitude = z_score.abs();
        if magnitude > threshold * 2.0 {
            Self::High
        } else if magnitude > threshold * 1.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// How the reference mean and deviation are taken for each point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZScoreMode {
    /// Against every other point. A lone spike cannot dilute its own score.
    #[default]
    LeaveOneOut,
    /// Against the whole series including the point itself.
    Population,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub index: usize,
    pub value: f64,
    /// Infinite when the reference points have no spread at all; such scores
    /// serialize as `null` and load back as `NaN`.
    #[serde(deserialize_with = "crate::core::types::lenient_value")]
    pub z_score: f64,
    pub severity: AnomalySeverity,
}

/// Leave-one-out z-score detection.
#[must_use]
pub fn detect_anomalies(values: &[f64], threshold: f64) -> Vec<Anomaly> {
    detect_anomalies_with(values, threshold, ZScoreMode::LeaveOneOut)
}

/// Flags points whose `|z| > threshold`. Indices refer to `values`;
/// non-finite entries are never scored.
#[must_use]
pub fn detect_anomalies_with(values: &[f64], threshold: f64, mode: ZScoreMode) -> Vec<Anomaly> {
    let finite: Vec<(usize, f64)> = values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .collect();
    let minimum = match mode {
        ZScoreMode::LeaveOneOut => 3,
        ZScoreMode::Population => 2,
    };
    if finite.len() < minimum || !threshold.is_finite() {
        return Vec::new();
    }

    let n = finite.len() as f64;
    let mean = finite.iter().map(|(_, v)| v).sum::<f64>() / n;
    let squares: f64 = finite.iter().map(|(_, v)| (v - mean).powi(2)).sum();

    finite
        .iter()
        .filter_map(|&(index, value)| {
            let z_score = match mode {
                ZScoreMode::Population => {
                    let std_dev = (squares / n).sqrt();
                    if std_dev == 0.0 {
                        return None;
                    }
                    (value - mean) / std_dev
                }
                ZScoreMode::LeaveOneOut => leave_one_out_score(value, mean, squares, n)?,
            };
            (z_score.abs() > threshold).then(|| Anomaly {
                index,
                value,
                z_score,
                severity: AnomalySeverity::classify(z_score, threshold),
            })
        })
        .collect()
}

/// Downdates the series mean and sum of squares to exclude `value`.
fn leave_one_out_score(value: f64, mean: f64, squares: f64, n: f64) -> Option<f64> {
    let rest = n - 1.0;
    let deviation = value - mean;
    let other_mean = mean - deviation / rest;
    let other_squares = (squares - deviation * deviation * n / rest).max(0.0);
    let distance = value - other_mean;

    // Relative floor absorbs the rounding left over by the downdate.
    if other_squares <= squares * 1e-12 {
        if distance == 0.0 || squares == 0.0 {
            return None;
        }
        return Some(f64::INFINITY.copysign(distance));
    }
    Some(distance / (other_squares / rest).sqrt())
}
