//! Series analytics: descriptive statistics, linear trend, seasonality,
//! z-score anomalies and cross-series correlation.
//!
//! Every function ignores non-finite values and degrades to an empty or
//! zero result on short input instead of failing.

mod anomaly;
mod correlation;
mod engine;
mod seasonality;
mod statistics;
mod trend;

pub use anomaly::{
    Anomaly, AnomalySeverity, DEFAULT_ANOMALY_THRESHOLD, ZScoreMode, detect_anomalies,
    detect_anomalies_with,
};
pub use correlation::{CorrelationMatrix, StrongCorrelation, correlation_matrix, pearson};
pub use engine::{
    AnalysisKind, AnalyticsConfig, AnalyticsEngine, AnalyticsResult, DatasetAnalytics,
    analyze_datasets,
};
pub use seasonality::{
    DEFAULT_SEASONALITY_MIN_LENGTH, MAX_SEASONAL_LAG, SEASONALITY_THRESHOLD, SeasonalityAnalysis,
    autocorrelation, detect_seasonality,
};
pub use statistics::{DescriptiveStatistics, describe, mean};
pub use trend::{STABLE_SLOPE_THRESHOLD, TrendAnalysis, TrendDirection, analyze_trend};
