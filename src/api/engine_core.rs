use crate::analytics::AnalyticsEngine;
use crate::core::{BarGeometry, ChartScale, Dataset, PieLayout, TreemapLayout, ViewTransform};
use crate::extensions::ChartPlugin;
use crate::interaction::InteractionState;
use crate::realtime::{RealtimeBuffer, Scheduler, SchedulerHandle, SnapshotCache};
use crate::render::SeriesPath;

use super::ChartEngineConfig;

/// Internal engine state used by the public facade (`ChartEngine`).
pub(super) struct EngineCore {
    pub(super) config: ChartEngineConfig,
    pub(super) datasets: Vec<Dataset>,
    pub(super) interaction: InteractionState,
    /// Dataset walked by keyboard navigation.
    pub(super) focused_dataset: usize,
    pub(super) realtime: RealtimeBuffer,
    pub(super) scheduler: Scheduler,
    pub(super) flush_timer: SchedulerHandle,
    pub(super) recompute: SchedulerHandle,
    pub(super) analytics: AnalyticsEngine,
    pub(super) layouts: LayoutCaches,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
}

/// Geometry derived from the datasets, one slot per output.
///
/// Every slot is keyed on the data fingerprint; anything else the geometry
/// depends on (viewport, padding, config, chart kind) invalidates explicitly.
#[derive(Default)]
pub(super) struct LayoutCaches {
    pub(super) scale: SnapshotCache<Option<ChartScale>>,
    pub(super) bars: SnapshotCache<Vec<BarGeometry>>,
    pub(super) pie: SnapshotCache<PieLayout>,
    /// Dataset the `pie` slot was computed for.
    pub(super) pie_dataset: Option<usize>,
    pub(super) series: SnapshotCache<Vec<SeriesPath>>,
    /// View transform the `series` slot was projected with.
    pub(super) series_view: Option<ViewTransform>,
    pub(super) treemap: SnapshotCache<TreemapLayout>,
}

impl LayoutCaches {
    pub(super) fn invalidate(&mut self) {
        self.scale.invalidate();
        self.bars.invalidate();
        self.pie.invalidate();
        self.pie_dataset = None;
        self.series.invalidate();
        self.series_view = None;
        self.treemap.invalidate();
    }

    /// Keeps the pie slot only while it belongs to `dataset_index`.
    pub(super) fn select_pie(&mut self, dataset_index: usize) {
        if self.pie_dataset != Some(dataset_index) {
            self.pie.invalidate();
            self.pie_dataset = Some(dataset_index);
        }
    }

    /// Keeps the series slot only while it was projected through `view`.
    pub(super) fn select_view(&mut self, view: ViewTransform) {
        if self.series_view != Some(view) {
            self.series.invalidate();
            self.series_view = Some(view);
        }
    }
}
