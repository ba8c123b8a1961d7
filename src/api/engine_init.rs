use tracing::debug;

use crate::analytics::AnalyticsEngine;
use crate::core::Dataset;
use crate::error::ChartResult;
use crate::interaction::InteractionState;
use crate::realtime::{RealtimeBuffer, Scheduler};
use crate::render::Renderer;

use super::validation::validate_engine_config;
use super::engine_core::{EngineCore, LayoutCaches};
use super::{ChartEngine, ChartEngineConfig};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with no datasets.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        validate_engine_config(&config)?;

        let mut scheduler = Scheduler::new();
        let flush_timer = scheduler.schedule_interval(config.realtime.flush_interval());
        let recompute = scheduler.create_debounce(config.realtime.debounce_window());

        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            chart_kind = ?config.chart_kind,
            "created chart engine"
        );

        Ok(Self {
            renderer,
            core: EngineCore {
                interaction: InteractionState::from_config(&config.interaction),
                realtime: RealtimeBuffer::new(config.realtime.max_data_points),
                analytics: AnalyticsEngine::new(config.analytics.clone()),
                config,
                datasets: Vec::new(),
                focused_dataset: 0,
                scheduler,
                flush_timer,
                recompute,
                layouts: LayoutCaches::default(),
                plugins: Vec::new(),
            },
        })
    }

    /// Creates an engine seeded with `datasets`.
    pub fn with_datasets(
        renderer: R,
        config: ChartEngineConfig,
        datasets: Vec<Dataset>,
    ) -> ChartResult<Self> {
        let mut engine = Self::new(renderer, config)?;
        engine.set_datasets(datasets);
        Ok(engine)
    }
}
