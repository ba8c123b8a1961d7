use tracing::{debug, trace};

use crate::error::ChartResult;
use crate::interaction::{
    InteractionEvent, InteractionMode, InteractionOutcome, InteractionState, NavigationContext,
    PointRef,
};
use crate::render::Renderer;

use super::validation::validate_dataset_index;
use super::{ChartEngine, PluginEvent};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn interaction_state(&self) -> &InteractionState {
        &self.core.interaction
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.core.interaction.mode()
    }

    #[must_use]
    pub fn focused_dataset(&self) -> usize {
        self.core.focused_dataset
    }

    /// Selects the dataset walked by keyboard navigation.
    pub fn set_focused_dataset(&mut self, index: usize) -> ChartResult<()> {
        validate_dataset_index(index, self.core.datasets.len())?;
        self.core.focused_dataset = index;
        Ok(())
    }

    fn navigation_context(&self) -> NavigationContext {
        NavigationContext {
            dataset_index: self.core.focused_dataset,
            point_count: self
                .core
                .datasets
                .get(self.core.focused_dataset)
                .map_or(0, |dataset| dataset.len()),
        }
    }

    /// Feeds one raw input event through the interaction state machine and
    /// notifies plugins about whatever it changed.
    pub fn dispatch(&mut self, event: InteractionEvent) -> InteractionOutcome {
        let navigation = self.navigation_context();
        let outcome =
            self.core
                .interaction
                .apply(&event, &self.core.config.interaction, navigation);
        trace!(
            mode = ?self.core.interaction.mode(),
            view_changed = outcome.view_changed,
            selection_changed = outcome.selection_changed,
            "dispatched interaction event"
        );
        self.emit_interaction_outcome(outcome);
        outcome
    }

    /// Programmatic zoom around a screen position.
    pub fn zoom_at(&mut self, center_x: f64, center_y: f64, factor: f64) -> bool {
        let changed =
            self.core
                .interaction
                .zoom_at(center_x, center_y, factor, &self.core.config.interaction);
        if changed {
            self.emit_view_changed();
        }
        changed
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        let changed = self.core.interaction.pan_by(dx, dy);
        if changed {
            self.emit_view_changed();
        }
        changed
    }

    pub fn toggle_selection(&mut self, point: PointRef) -> bool {
        let changed = self
            .core
            .interaction
            .toggle_selection(point, self.core.config.interaction.max_selection);
        if changed {
            self.emit_plugin_event(PluginEvent::SelectionChanged {
                selected_len: self.core.interaction.selected_points().len(),
            });
        }
        changed
    }

    /// Zoom 1, no pan, empty selection; `pan_enabled` follows the config.
    pub fn reset_view(&mut self) {
        self.core.interaction.reset();
        debug!("reset interaction view");
        self.emit_view_changed();
        self.emit_plugin_event(PluginEvent::SelectionChanged { selected_len: 0 });
    }

    fn emit_view_changed(&mut self) {
        let view = self.core.interaction.view_transform();
        self.emit_plugin_event(PluginEvent::ViewChanged {
            zoom: view.zoom,
            pan_x: view.pan_x,
            pan_y: view.pan_y,
        });
    }

    fn emit_interaction_outcome(&mut self, outcome: InteractionOutcome) {
        if let Some(point) = outcome.activated {
            self.emit_plugin_event(PluginEvent::PointActivated(point));
        }
        if outcome.selection_changed {
            self.emit_plugin_event(PluginEvent::SelectionChanged {
                selected_len: self.core.interaction.selected_points().len(),
            });
        }
        if outcome.view_changed {
            self.emit_view_changed();
        }
        if outcome.crosshair_changed {
            match self.core.interaction.crosshair() {
                Some(crosshair) => self.emit_plugin_event(PluginEvent::CrosshairMoved {
                    x: crosshair.x,
                    y: crosshair.y,
                }),
                None => self.emit_plugin_event(PluginEvent::PointerLeft),
            }
        }
    }
}
