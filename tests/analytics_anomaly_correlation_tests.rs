use approx::assert_abs_diff_eq;
use chart_compute::analytics::{
    AnomalySeverity, ZScoreMode, correlation_matrix, detect_anomalies, detect_anomalies_with,
    pearson,
};

const CALM: [f64; 8] = [10.0, 10.5, 9.5, 10.0, 10.2, 9.8, 10.1, 9.9];

fn calm_with(last: f64) -> Vec<f64> {
    let mut values = CALM.to_vec();
    values.push(last);
    values
}

#[test]
fn single_spike_is_flagged_alone() {
    let anomalies = detect_anomalies(&[10.0, 11.0, 9.0, 10.0, 50.0, 10.0, 11.0], 2.5);

    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].index, 4);
    assert_eq!(anomalies[0].value, 50.0);
    assert!(anomalies[0].z_score > 50.0);
    assert_eq!(anomalies[0].severity, AnomalySeverity::High);
}

#[test]
fn population_scores_are_bounded_by_sample_size() {
    // With seven points no population z-score can exceed sqrt(6).
    let anomalies = detect_anomalies_with(
        &[10.0, 11.0, 9.0, 10.0, 50.0, 10.0, 11.0],
        2.5,
        ZScoreMode::Population,
    );
    assert!(anomalies.is_empty());

    let anomalies = detect_anomalies_with(
        &[10.0, 11.0, 9.0, 10.0, 50.0, 10.0, 11.0],
        2.0,
        ZScoreMode::Population,
    );
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].index, 4);
}

#[test]
fn severity_scales_with_distance() {
    let low = detect_anomalies(&calm_with(10.85), 2.5);
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].severity, AnomalySeverity::Low);

    let medium = detect_anomalies(&calm_with(11.2), 2.5);
    assert_eq!(medium.len(), 1);
    assert_eq!(medium[0].severity, AnomalySeverity::Medium);

    let high = detect_anomalies(&calm_with(13.0), 2.5);
    assert_eq!(high[0].severity, AnomalySeverity::High);
}

#[test]
fn negative_spikes_keep_their_sign() {
    let anomalies = detect_anomalies(&calm_with(8.8), 2.5);
    assert_eq!(anomalies.len(), 1);
    assert!(anomalies[0].z_score < -3.75);
    assert_eq!(anomalies[0].severity, AnomalySeverity::Medium);
}

#[test]
fn deviation_from_flat_reference_is_infinitely_anomalous() {
    let anomalies = detect_anomalies(&[10.0, 10.0, 10.0, 10.0, 12.0], 2.5);
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].index, 4);
    assert_eq!(anomalies[0].z_score, f64::INFINITY);
    assert_eq!(anomalies[0].severity, AnomalySeverity::High);
}

#[test]
fn constant_and_short_series_have_no_anomalies() {
    assert!(detect_anomalies(&[5.0; 10], 2.5).is_empty());
    assert!(detect_anomalies(&[1.0, 100.0], 2.5).is_empty());
    assert!(detect_anomalies(&[], 2.5).is_empty());
}

#[test]
fn indices_skip_over_invalid_points() {
    let mut values = vec![f64::NAN];
    values.extend([10.0, 11.0, 9.0, 10.0, 50.0, 10.0, 11.0]);
    let anomalies = detect_anomalies(&values, 2.5);
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].index, 5);
}

#[test]
fn pearson_detects_perfect_and_partial_relationships() {
    let up = [1.0, 2.0, 3.0, 4.0, 5.0];
    let down = [5.0, 4.0, 3.0, 2.0, 1.0];
    let near = [2.0, 1.0, 4.0, 3.0, 5.0];

    assert_abs_diff_eq!(pearson(&up, &up), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(pearson(&up, &down), -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(pearson(&up, &near), 0.8, epsilon = 1e-12);
    assert_eq!(pearson(&up[..1], &down[..1]), 0.0);
}

#[test]
fn matrix_is_symmetric_with_unit_diagonal() {
    let series = vec![
        ("up".to_owned(), vec![1.0, 2.0, 3.0, 4.0, 5.0]),
        ("near".to_owned(), vec![2.0, 1.0, 4.0, 3.0, 5.0]),
        ("down".to_owned(), vec![5.0, 4.0, 3.0, 2.0, 1.0]),
        ("noise".to_owned(), vec![3.0, 1.0, 5.0, 1.0, 3.0]),
    ];
    let matrix = correlation_matrix(&series, 0.7);

    assert_eq!(matrix.labels, vec!["up", "near", "down", "noise"]);
    for i in 0..4 {
        assert_eq!(matrix.get(i, i), Some(1.0));
        for j in 0..4 {
            assert_eq!(matrix.get(i, j), matrix.get(j, i));
        }
    }
    assert_eq!(matrix.get(4, 0), None);

    assert_eq!(matrix.strong.len(), 3);
    let strongest = &matrix.strong[0];
    assert_eq!((strongest.first_label.as_str(), strongest.second_label.as_str()), ("up", "down"));
    assert_abs_diff_eq!(strongest.coefficient, -1.0, epsilon = 1e-12);
    assert!(matrix.strong.iter().all(|pair| pair.coefficient.abs() > 0.7));
    assert!(
        matrix
            .strong
            .windows(2)
            .all(|pair| pair[0].coefficient.abs() >= pair[1].coefficient.abs())
    );
    assert!(!matrix.strong.iter().any(|pair| pair.second_label == "noise"));
}
