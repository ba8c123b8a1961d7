use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Dataset;
use crate::error::{ChartError, ChartResult};
use crate::realtime::{SnapshotCache, SnapshotCacheStats};

use super::anomaly::{Anomaly, DEFAULT_ANOMALY_THRESHOLD, ZScoreMode, detect_anomalies_with};
use super::correlation::{CorrelationMatrix, correlation_matrix};
use super::seasonality::{DEFAULT_SEASONALITY_MIN_LENGTH, SeasonalityAnalysis, detect_seasonality};
use super::statistics::{DescriptiveStatistics, describe};
use super::trend::{TrendAnalysis, analyze_trend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Statistics,
    Trend,
    Seasonality,
    Anomalies,
    Correlation,
}

impl AnalysisKind {
    pub const ALL: [Self; 5] = [
        Self::Statistics,
        Self::Trend,
        Self::Seasonality,
        Self::Anomalies,
        Self::Correlation,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Statistics => "statistics",
            Self::Trend => "trend",
            Self::Seasonality => "seasonality",
            Self::Anomalies => "anomalies",
            Self::Correlation => "correlation",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ChartError::UnsupportedMode {
                kind: "analysis",
                value: value.to_owned(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_anomaly_threshold")]
    pub anomaly_threshold: f64,
    #[serde(default = "default_seasonality_min_length")]
    pub seasonality_min_length: usize,
    #[serde(default = "default_strong_correlation_threshold")]
    pub strong_correlation_threshold: f64,
    #[serde(default = "default_forecast_horizon")]
    pub forecast_horizon: usize,
    #[serde(default)]
    pub z_score_mode: ZScoreMode,
    #[serde(default = "default_enabled")]
    pub enabled: Vec<AnalysisKind>,
}

fn default_anomaly_threshold() -> f64 {
    DEFAULT_ANOMALY_THRESHOLD
}

fn default_seasonality_min_length() -> usize {
    DEFAULT_SEASONALITY_MIN_LENGTH
}

fn default_strong_correlation_threshold() -> f64 {
    0.7
}

fn default_forecast_horizon() -> usize {
    5
}

fn default_enabled() -> Vec<AnalysisKind> {
    AnalysisKind::ALL.to_vec()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            anomaly_threshold: default_anomaly_threshold(),
            seasonality_min_length: default_seasonality_min_length(),
            strong_correlation_threshold: default_strong_correlation_threshold(),
            forecast_horizon: default_forecast_horizon(),
            z_score_mode: ZScoreMode::default(),
            enabled: default_enabled(),
        }
    }
}

impl AnalyticsConfig {
    #[must_use]
    pub fn with_anomaly_threshold(mut self, threshold: f64) -> Self {
        self.anomaly_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_z_score_mode(mut self, mode: ZScoreMode) -> Self {
        self.z_score_mode = mode;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: impl IntoIterator<Item = AnalysisKind>) -> Self {
        self.enabled = enabled.into_iter().collect();
        self
    }

    /// Enables analyses by name, e.g. `["trend", "anomalies"]`.
    pub fn with_enabled_names<'a>(self, names: impl IntoIterator<Item = &'a str>) -> ChartResult<Self> {
        let enabled = names
            .into_iter()
            .map(AnalysisKind::from_str)
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(self.with_enabled(enabled))
    }

    #[must_use]
    pub fn is_enabled(&self, kind: AnalysisKind) -> bool {
        self.enabled.contains(&kind)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatasetAnalytics {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<DescriptiveStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<SeasonalityAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomalies: Option<Vec<Anomaly>>,
}

/// Read-only analytics snapshot over every dataset, hidden ones included.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsResult {
    pub datasets: Vec<DatasetAnalytics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationMatrix>,
}

impl AnalyticsResult {
    #[must_use]
    pub fn dataset(&self, label: &str) -> Option<&DatasetAnalytics> {
        self.datasets.iter().find(|entry| entry.label == label)
    }
}

/// Runs every enabled analysis without caching.
#[must_use]
pub fn analyze_datasets(datasets: &[Dataset], config: &AnalyticsConfig) -> AnalyticsResult {
    let per_dataset = datasets
        .iter()
        .map(|dataset| {
            // Raw values keep anomaly indices aligned with point indices.
            let raw: Vec<f64> = dataset.data.iter().map(|point| point.value).collect();
            analyze_series(&dataset.label, &raw, config)
        })
        .collect();

    let correlation = config.is_enabled(AnalysisKind::Correlation).then(|| {
        let series: Vec<(String, Vec<f64>)> = datasets
            .iter()
            .map(|dataset| (dataset.label.clone(), dataset.values()))
            .collect();
        correlation_matrix(&series, config.strong_correlation_threshold)
    });

    AnalyticsResult {
        datasets: per_dataset,
        correlation,
    }
}

fn analyze_series(label: &str, values: &[f64], config: &AnalyticsConfig) -> DatasetAnalytics {
    DatasetAnalytics {
        label: label.to_owned(),
        statistics: config
            .is_enabled(AnalysisKind::Statistics)
            .then(|| describe(values)),
        trend: config
            .is_enabled(AnalysisKind::Trend)
            .then(|| analyze_trend(values, config.forecast_horizon)),
        seasonality: config
            .is_enabled(AnalysisKind::Seasonality)
            .then(|| detect_seasonality(values, config.seasonality_min_length)),
        anomalies: config.is_enabled(AnalysisKind::Anomalies).then(|| {
            detect_anomalies_with(values, config.anomaly_threshold, config.z_score_mode)
        }),
    }
}

/// Analytics with a fingerprint-keyed result cache.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
    cache: SnapshotCache<AnalyticsResult>,
}

impl AnalyticsEngine {
    #[must_use]
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            config,
            cache: SnapshotCache::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnalyticsConfig) {
        if self.config != config {
            self.config = config;
            self.cache.invalidate();
        }
    }

    /// Returns the cached result while the datasets are unchanged.
    pub fn analyze(&mut self, datasets: &[Dataset]) -> Rc<AnalyticsResult> {
        let config = &self.config;
        self.cache.get_or_compute(datasets, |datasets| {
            let result = analyze_datasets(datasets, config);
            debug!(
                datasets = datasets.len(),
                anomalies = result
                    .datasets
                    .iter()
                    .filter_map(|entry| entry.anomalies.as_ref())
                    .map(Vec::len)
                    .sum::<usize>(),
                "recomputed analytics"
            );
            result
        })
    }

    #[must_use]
    pub fn cached(&self, datasets: &[Dataset]) -> Option<Rc<AnalyticsResult>> {
        self.cache.peek(datasets)
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    #[must_use]
    pub fn cache_stats(&self) -> SnapshotCacheStats {
        self.cache.stats()
    }
}
