use std::rc::Rc;

use tracing::debug;

use crate::analytics::{AnalyticsConfig, AnalyticsResult};
use crate::error::ChartResult;
use crate::realtime::SnapshotCacheStats;
use crate::render::Renderer;

use super::validation::validate_analytics_config;
use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    /// Analytics for the current datasets. Repeated calls over unchanged data
    /// return the same `Rc`.
    pub fn analytics(&mut self) -> Rc<AnalyticsResult> {
        self.core.analytics.analyze(&self.core.datasets)
    }

    /// Cached analytics, if still valid for the current datasets.
    #[must_use]
    pub fn cached_analytics(&self) -> Option<Rc<AnalyticsResult>> {
        self.core.analytics.cached(&self.core.datasets)
    }

    #[must_use]
    pub fn analytics_config(&self) -> &AnalyticsConfig {
        self.core.analytics.config()
    }

    pub fn set_analytics_config(&mut self, config: AnalyticsConfig) -> ChartResult<()> {
        validate_analytics_config(&config)?;
        self.core.config.analytics = config.clone();
        self.core.analytics.set_config(config);
        Ok(())
    }

    #[must_use]
    pub fn analytics_cache_stats(&self) -> SnapshotCacheStats {
        self.core.analytics.cache_stats()
    }

    pub(super) fn refresh_analytics(&mut self) {
        let result = self.analytics();
        let anomalies = result
            .datasets
            .iter()
            .filter_map(|entry| entry.anomalies.as_ref())
            .map(Vec::len)
            .sum();
        debug!(anomalies, "analytics refreshed");
        self.emit_plugin_event(PluginEvent::AnalyticsUpdated { anomalies });
    }
}
