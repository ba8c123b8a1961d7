use serde::{Deserialize, Serialize};

/// Autocorrelation above this marks a series as seasonal.
pub const SEASONALITY_THRESHOLD: f64 = 0.3;
/// Longest lag examined.
pub const MAX_SEASONAL_LAG: usize = 24;
pub const DEFAULT_SEASONALITY_MIN_LENGTH: usize = 12;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeasonalityAnalysis {
    pub has_seasonality: bool,
    /// Lag with the highest autocorrelation.
    pub period: Option<usize>,
    pub strength: f64,
    /// Autocorrelation for lags `1..=autocorrelation.len()`.
    pub autocorrelation: Vec<f64>,
    /// Indices strictly greater than both neighbours.
    pub peaks: Vec<usize>,
    /// Indices strictly lower than both neighbours.
    pub troughs: Vec<usize>,
}

/// Normalized autocorrelation of `values` at `lag`.
#[must_use]
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    if lag == 0 || lag >= values.len() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let denominator: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let numerator: f64 = values
        .iter()
        .zip(&values[lag..])
        .map(|(a, b)| (a - mean) * (b - mean))
        .sum();
    numerator / denominator
}

/// Detects periodicity; series shorter than `min_length` report none.
#[must_use]
pub fn detect_seasonality(values: &[f64], min_length: usize) -> SeasonalityAnalysis {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.len() < min_length.max(3) {
        return SeasonalityAnalysis::default();
    }

    let max_lag = (values.len() / 3).min(MAX_SEASONAL_LAG);
    let correlations: Vec<f64> = (1..=max_lag)
        .map(|lag| autocorrelation(&values, lag))
        .collect();

    let best = correlations
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (index, r)| match best {
            Some((_, best_r)) if best_r >= *r => best,
            _ => Some((index + 1, *r)),
        });

    let (period, strength) = match best {
        Some((lag, r)) => (Some(lag), r),
        None => (None, 0.0),
    };

    let mut peaks = Vec::new();
    let mut troughs = Vec::new();
    for (offset, window) in values.windows(3).enumerate() {
        let (prev, current, next) = (window[0], window[1], window[2]);
        if current > prev && current > next {
            peaks.push(offset + 1);
        } else if current < prev && current < next {
            troughs.push(offset + 1);
        }
    }

    SeasonalityAnalysis {
        has_seasonality: strength > SEASONALITY_THRESHOLD,
        period,
        strength,
        autocorrelation: correlations,
        peaks,
        troughs,
    }
}
