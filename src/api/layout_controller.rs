use std::rc::Rc;

use tracing::debug;

use crate::core::{
    BarGeometry, ChartKind, ChartScale, DataPoint, Dataset, PieLayout, Rect, TreemapLayout,
    layout_bars, layout_pie, layout_treemap, points_in_index_window, treemap_items_from_datasets,
};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::validation::validate_dataset_index;
use super::{ChartEngine, ChartEngineConfig};

/// Inner radius ratio used by donut charts configured without one.
pub const DEFAULT_DONUT_RATIO: f64 = 0.5;

/// Bars get a zero-based value axis; every other kind spans the data.
pub(super) fn base_scale_for(datasets: &[Dataset], config: &ChartEngineConfig) -> Option<ChartScale> {
    match config.chart_kind {
        ChartKind::Bar => {
            ChartScale::for_bars(datasets, config.viewport, config.padding, config.bar.stacked)
        }
        _ => ChartScale::from_datasets(datasets, config.viewport, config.padding),
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Plot area inside the padding.
    #[must_use]
    pub fn plot_rect(&self) -> Rect {
        let viewport = self.core.config.viewport;
        let padding = self.core.config.padding;
        Rect::new(
            padding.left,
            padding.top,
            (f64::from(viewport.width) - padding.left - padding.right).max(0.0),
            (f64::from(viewport.height) - padding.top - padding.bottom).max(0.0),
        )
    }

    /// Scale over the visible datasets without the interaction view applied.
    pub fn base_scale(&mut self) -> Option<ChartScale> {
        let config = &self.core.config;
        *self
            .core
            .layouts
            .scale
            .get_or_compute(&self.core.datasets, |datasets| {
                base_scale_for(datasets, config)
            })
    }

    /// Scale composed with the current zoom and pan; `None` without valid data.
    pub fn scale(&mut self) -> Option<ChartScale> {
        let view = self.core.interaction.view_transform();
        self.base_scale().map(|scale| scale.with_view(view))
    }

    /// Bars in plot coordinates, cached until the data, viewport, padding or
    /// config change.
    pub fn bar_layout(&mut self) -> Rc<Vec<BarGeometry>> {
        let config = &self.core.config;
        self.core
            .layouts
            .bars
            .get_or_compute(&self.core.datasets, |datasets| {
                debug!(datasets = datasets.len(), "recomputing bar layout");
                ChartScale::for_bars(datasets, config.viewport, config.padding, config.bar.stacked)
                    .map(|scale| layout_bars(datasets, &scale, &config.bar))
                    .unwrap_or_default()
            })
    }

    /// Slices of one dataset with circle geometry for the plot area. The last
    /// requested dataset stays cached.
    pub fn pie_layout(&mut self, dataset_index: usize) -> ChartResult<Rc<PieLayout>> {
        validate_dataset_index(dataset_index, self.core.datasets.len())?;
        let config = &self.core.config;
        let ratio = match config.chart_kind {
            ChartKind::Donut if config.pie.inner_radius_ratio <= 0.0 => DEFAULT_DONUT_RATIO,
            _ => config.pie.inner_radius_ratio,
        };
        let layouts = &mut self.core.layouts;
        layouts.select_pie(dataset_index);
        Ok(layouts.pie.get_or_compute(&self.core.datasets, |datasets| {
            debug!(dataset_index, "recomputing pie layout");
            layout_pie(&datasets[dataset_index], &config.pie).with_geometry(
                config.viewport,
                config.padding,
                ratio,
            )
        }))
    }

    /// Dataset/point treemap over the plot area, cached until the data,
    /// viewport or padding change.
    pub fn treemap_layout(&mut self) -> Rc<TreemapLayout> {
        let bounds = self.plot_rect();
        self.core
            .layouts
            .treemap
            .get_or_compute(&self.core.datasets, |datasets| {
                layout_treemap(&treemap_items_from_datasets(datasets), bounds)
            })
    }

    /// Points of one dataset whose x position falls inside the plot area under
    /// the current zoom and pan.
    pub fn visible_points(&self, dataset_index: usize) -> ChartResult<&[DataPoint]> {
        let dataset = self.dataset(dataset_index)?;
        let len = dataset.len();
        if len <= 1 {
            return Ok(&dataset.data);
        }
        let plot = self.plot_rect();
        let view = self.core.interaction.view_transform();
        let (left, _) = view.invert(plot.x, 0.0);
        let (right, _) = view.invert(plot.right(), 0.0);
        if plot.width <= 0.0 || !left.is_finite() || !right.is_finite() {
            return Ok(&dataset.data);
        }
        if right < plot.x || left > plot.right() {
            return Ok(&[]);
        }

        let last = (len - 1) as f64;
        let to_index = |x: f64| ((x - plot.x) / plot.width * last).clamp(0.0, last);
        let (start, end) = (to_index(left).floor(), to_index(right).ceil());
        Ok(points_in_index_window(
            &dataset.data,
            start as usize,
            end as usize,
        ))
    }
}
