use approx::assert_relative_eq;
use chart_compute::analytics::{
    MAX_SEASONAL_LAG, TrendDirection, analyze_trend, autocorrelation, detect_seasonality,
};

/// One spike per period on a flat floor.
fn spikes(len: usize, period: usize) -> Vec<f64> {
    (0..len)
        .map(|i| if i % period == 0 { 10.0 } else { 0.0 })
        .collect()
}

#[test]
fn linear_series_has_exact_fit_and_forecast() {
    let values: Vec<f64> = (0..10_i32).map(|i| 2.0 * f64::from(i) + 1.0).collect();
    let trend = analyze_trend(&values, 3);

    assert_relative_eq!(trend.slope, 2.0, epsilon = 1e-12);
    assert_relative_eq!(trend.intercept, 1.0, epsilon = 1e-12);
    assert_relative_eq!(trend.r_squared, 1.0, epsilon = 1e-12);
    assert_eq!(trend.direction, TrendDirection::Increasing);
    assert_eq!(trend.forecast.len(), 3);
    assert_relative_eq!(trend.forecast[0], 21.0, epsilon = 1e-9);
    assert_relative_eq!(trend.forecast[2], 25.0, epsilon = 1e-9);
}

#[test]
fn falling_series_is_decreasing() {
    let trend = analyze_trend(&[9.0, 7.0, 5.0, 3.0], 0);
    assert_eq!(trend.direction, TrendDirection::Decreasing);
    assert_relative_eq!(trend.correlation, -1.0, epsilon = 1e-12);
    assert!(trend.forecast.is_empty());
}

#[test]
fn flat_series_is_stable() {
    let trend = analyze_trend(&[5.0, 5.001, 4.999, 5.0], 2);
    assert_eq!(trend.direction, TrendDirection::Stable);
}

#[test]
fn short_series_yield_default_trend() {
    let trend = analyze_trend(&[42.0], 5);
    assert_eq!(trend.slope, 0.0);
    assert_eq!(trend.direction, TrendDirection::Stable);
    assert!(trend.forecast.is_empty());
}

#[test]
fn autocorrelation_peaks_at_period() {
    let values = spikes(48, 6);
    assert_relative_eq!(autocorrelation(&values, 6), 0.875, epsilon = 1e-9);
    assert!(autocorrelation(&values, 1) < 0.0);
    assert_eq!(autocorrelation(&values, 0), 0.0);
    assert_eq!(autocorrelation(&values, 48), 0.0);
}

#[test]
fn periodic_series_is_seasonal_with_detected_period() {
    let analysis = detect_seasonality(&spikes(48, 6), 12);

    assert!(analysis.has_seasonality);
    assert_eq!(analysis.period, Some(6));
    assert_relative_eq!(analysis.strength, 0.875, epsilon = 1e-9);
    assert_eq!(analysis.autocorrelation.len(), 16);
    assert_eq!(analysis.peaks, vec![6, 12, 18, 24, 30, 36, 42]);
    assert!(analysis.troughs.is_empty());
}

#[test]
fn max_lag_is_capped() {
    let analysis = detect_seasonality(&spikes(300, 7), 12);
    assert_eq!(analysis.autocorrelation.len(), MAX_SEASONAL_LAG);
    assert_eq!(analysis.period, Some(7));
}

#[test]
fn noise_without_repetition_is_not_seasonal() {
    let analysis = detect_seasonality(&[3.0, 9.0, 1.0, 7.0, 2.0, 8.0, 4.0, 4.5, 6.0, 0.5, 5.0, 7.5], 12);
    assert!(analysis.strength <= 0.3);
    assert!(!analysis.has_seasonality);
}

#[test]
fn series_shorter_than_min_length_report_nothing() {
    let analysis = detect_seasonality(&spikes(10, 4), 12);
    assert!(!analysis.has_seasonality);
    assert_eq!(analysis.period, None);
    assert!(analysis.autocorrelation.is_empty());
}

#[test]
fn strict_peaks_and_troughs() {
    let analysis = detect_seasonality(&[1.0, 3.0, 1.0, 2.0, 2.0, 0.0, 4.0], 3);
    assert_eq!(analysis.peaks, vec![1]);
    assert_eq!(analysis.troughs, vec![2, 5]);
}
