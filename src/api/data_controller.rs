use tracing::debug;

use crate::core::{ChartKind, Dataset, Padding, Viewport};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::validation::{
    validate_dataset_index, validate_engine_config, validate_padding, validate_viewport,
};
use super::{ChartEngine, ChartEngineConfig, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn datasets(&self) -> &[Dataset] {
        &self.core.datasets
    }

    /// Mutable access for in-place edits. Derived caches notice the change
    /// through their fingerprint on the next read; call
    /// [`ChartEngine::notify_datasets_changed`] to also schedule recomputation
    /// and notify plugins.
    pub fn datasets_mut(&mut self) -> &mut Vec<Dataset> {
        &mut self.core.datasets
    }

    pub fn dataset(&self, index: usize) -> ChartResult<&Dataset> {
        validate_dataset_index(index, self.core.datasets.len())?;
        Ok(&self.core.datasets[index])
    }

    /// Replaces every dataset.
    pub fn set_datasets(&mut self, datasets: Vec<Dataset>) {
        self.core.datasets = datasets;
        if self.core.focused_dataset >= self.core.datasets.len() {
            self.core.focused_dataset = 0;
        }
        debug!(
            datasets = self.core.datasets.len(),
            points = self.total_points(),
            "replaced datasets"
        );
        self.notify_datasets_changed();
    }

    /// Appends one dataset and returns its index.
    pub fn add_dataset(&mut self, dataset: Dataset) -> usize {
        self.core.datasets.push(dataset);
        self.notify_datasets_changed();
        self.core.datasets.len() - 1
    }

    pub fn set_dataset_visible(&mut self, index: usize, visible: bool) -> ChartResult<()> {
        validate_dataset_index(index, self.core.datasets.len())?;
        self.core.datasets[index].visible = Some(visible);
        self.notify_datasets_changed();
        Ok(())
    }

    /// Arms the recompute debounce and tells plugins the data moved.
    pub fn notify_datasets_changed(&mut self) {
        self.core.scheduler.trigger(self.core.recompute);
        self.emit_plugin_event(PluginEvent::DatasetsUpdated {
            datasets_len: self.core.datasets.len(),
            points_len: self.total_points(),
        });
    }

    #[must_use]
    pub fn total_points(&self) -> usize {
        self.core.datasets.iter().map(Dataset::len).sum()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        validate_viewport(viewport)?;
        if self.core.config.viewport == viewport {
            return Ok(());
        }
        self.core.config.viewport = viewport;
        self.core.layouts.invalidate();
        self.emit_plugin_event(PluginEvent::ViewportChanged {
            width: viewport.width,
            height: viewport.height,
        });
        Ok(())
    }

    pub fn set_padding(&mut self, padding: Padding) -> ChartResult<()> {
        validate_padding(padding)?;
        self.core.config.padding = padding;
        self.core.layouts.invalidate();
        Ok(())
    }

    pub fn set_chart_kind(&mut self, chart_kind: ChartKind) {
        if self.core.config.chart_kind != chart_kind {
            self.core.config.chart_kind = chart_kind;
            self.core.layouts.invalidate();
        }
    }

    /// Swaps the whole configuration. Timers are re-registered when their
    /// periods change; interaction keeps its view but follows `pan_enabled`.
    pub fn set_config(&mut self, config: ChartEngineConfig) -> ChartResult<()> {
        validate_engine_config(&config)?;
        let previous = std::mem::replace(&mut self.core.config, config);
        let config = &self.core.config;

        if previous.realtime.flush_interval() != config.realtime.flush_interval() {
            self.core.scheduler.cancel(self.core.flush_timer);
            self.core.flush_timer = self
                .core
                .scheduler
                .schedule_interval(config.realtime.flush_interval());
        }
        if previous.realtime.debounce_window() != config.realtime.debounce_window() {
            let pending = self.core.scheduler.is_pending(self.core.recompute);
            self.core.scheduler.cancel(self.core.recompute);
            self.core.recompute = self
                .core
                .scheduler
                .create_debounce(config.realtime.debounce_window());
            if pending {
                self.core.scheduler.trigger(self.core.recompute);
            }
        }

        let cap_changed = previous.realtime.max_data_points != config.realtime.max_data_points;
        self.core
            .realtime
            .set_max_data_points(config.realtime.max_data_points);
        self.core
            .interaction
            .set_pan_enabled(config.interaction.pan_enabled);
        self.core.analytics.set_config(config.analytics.clone());
        self.core.layouts.invalidate();
        debug!(chart_kind = ?config.chart_kind, "applied engine config");

        if cap_changed {
            let dropped = self.core.realtime.enforce_retention(&mut self.core.datasets);
            if dropped > 0 {
                debug!(
                    dropped,
                    max_data_points = self.core.realtime.max_data_points(),
                    "trimmed datasets to new retention cap"
                );
                self.notify_datasets_changed();
            }
        }
        Ok(())
    }
}
