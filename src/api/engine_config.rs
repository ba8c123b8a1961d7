use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsConfig;
use crate::core::{BarLayoutConfig, ChartKind, Padding, PieLayoutConfig, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionConfig;
use crate::realtime::RealtimeConfig;

/// Public engine bootstrap configuration.
///
/// Every section except `viewport` falls back to its defaults when omitted,
/// so a host can persist only what it changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub chart_kind: ChartKind,
    #[serde(default)]
    pub bar: BarLayoutConfig,
    #[serde(default)]
    pub pie: PieLayoutConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub realtime: RealtimeConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            padding: Padding::default(),
            chart_kind: ChartKind::default(),
            bar: BarLayoutConfig::default(),
            pie: PieLayoutConfig::default(),
            interaction: InteractionConfig::default(),
            realtime: RealtimeConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_chart_kind(mut self, chart_kind: ChartKind) -> Self {
        self.chart_kind = chart_kind;
        self
    }

    #[must_use]
    pub fn with_bar(mut self, bar: BarLayoutConfig) -> Self {
        self.bar = bar;
        self
    }

    #[must_use]
    pub fn with_pie(mut self, pie: PieLayoutConfig) -> Self {
        self.pie = pie;
        self
    }

    #[must_use]
    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    #[must_use]
    pub fn with_realtime(mut self, realtime: RealtimeConfig) -> Self {
        self.realtime = realtime;
        self
    }

    #[must_use]
    pub fn with_analytics(mut self, analytics: AnalyticsConfig) -> Self {
        self.analytics = analytics;
        self
    }

    /// Parses a JSON document. Shape errors and unknown enum values are
    /// reported as `InvalidConfig`; range checks happen on engine construction.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse engine config: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize engine config: {e}"))
        })
    }
}
