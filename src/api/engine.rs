use tracing::debug;

use crate::core::{ChartKind, Padding, Viewport};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartEngineConfig, PluginEvent, engine_core::EngineCore};

/// Main orchestration facade consumed by host applications.
///
/// One engine owns the datasets, interaction state, real-time buffer,
/// scheduler, analytics cache and plugins of a single chart. Nothing is
/// shared between engines.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.core.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.config.viewport
    }

    #[must_use]
    pub fn padding(&self) -> Padding {
        self.core.config.padding
    }

    #[must_use]
    pub fn chart_kind(&self) -> ChartKind {
        self.core.config.chart_kind
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Builds the current frame and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    /// Scheduler registrations still alive: the flush timer, the recompute
    /// debounce and any pending frame callbacks.
    #[must_use]
    pub fn active_scheduler_handles(&self) -> usize {
        self.core.scheduler.active_handles()
    }

    /// Tears the engine down, releasing every scheduler handle, and gives the
    /// renderer back.
    #[must_use]
    pub fn destroy(mut self) -> R {
        let released = self.core.scheduler.cancel_all();
        self.core.realtime.clear();
        self.core.plugins.clear();
        debug!(released, "destroyed chart engine");
        self.renderer
    }
}
