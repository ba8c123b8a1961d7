use crate::extensions::PluginContext;
use crate::render::Renderer;

use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.core.config.viewport,
            chart_kind: self.core.config.chart_kind,
            datasets_len: self.core.datasets.len(),
            points_len: self.total_points(),
            interaction_mode: self.core.interaction.mode(),
            zoom_level: self.core.interaction.zoom_level(),
            selected_len: self.core.interaction.selected_points().len(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.core.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.core.plugins {
            plugin.on_event(event, context);
        }
    }
}
