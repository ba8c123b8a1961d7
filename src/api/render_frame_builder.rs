use std::rc::Rc;

use crate::core::{BarGeometry, ChartKind, ViewTransform, decimation_step};
use crate::render::{RenderFrame, Renderer, SeriesPath};

use super::ChartEngine;

fn view_bar(bar: BarGeometry, view: ViewTransform) -> BarGeometry {
    let (x, y) = view.apply(bar.x, bar.y);
    BarGeometry {
        x,
        y,
        width: bar.width * view.zoom,
        height: bar.height * view.zoom,
        ..bar
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Screen-space polylines of every visible dataset, thinned to
    /// `realtime.render_max_points`. Cached per data snapshot and view.
    pub fn series_paths(&mut self) -> Rc<Vec<SeriesPath>> {
        let scale = self.scale();
        let max_points = self.core.config.realtime.render_max_points.unwrap_or(0);
        let layouts = &mut self.core.layouts;
        layouts.select_view(self.core.interaction.view_transform());
        layouts.series.get_or_compute(&self.core.datasets, |datasets| {
            let Some(scale) = scale else {
                return Vec::new();
            };
            datasets
                .iter()
                .enumerate()
                .filter(|(_, dataset)| dataset.is_visible())
                .map(|(dataset_index, dataset)| {
                    let len = dataset.len();
                    let points = dataset
                        .data
                        .iter()
                        .enumerate()
                        .step_by(decimation_step(len, max_points))
                        .filter(|(_, point)| point.is_valid())
                        .map(|(index, point)| scale.project(index, len, point.value))
                        .collect();
                    SeriesPath {
                        dataset_index,
                        label: dataset.label.clone(),
                        color: dataset.color.clone(),
                        points,
                    }
                })
                .collect()
        })
    }

    pub(super) fn build_render_frame(&mut self) -> RenderFrame {
        let chart_kind = self.core.config.chart_kind;
        let view = self.core.interaction.view_transform();
        let mut frame = RenderFrame::new(self.core.config.viewport, chart_kind);
        frame.view = view;

        match chart_kind {
            ChartKind::Line => frame.series = self.series_paths(),
            ChartKind::Bar => {
                frame.bars = self
                    .bar_layout()
                    .iter()
                    .map(|bar| view_bar(*bar, view))
                    .collect();
            }
            ChartKind::Pie | ChartKind::Donut => {
                frame.pie = self.pie_layout(self.core.focused_dataset).ok();
            }
            ChartKind::Treemap => frame.treemap = Some(self.treemap_layout()),
        }

        let interaction = &self.core.interaction;
        frame.crosshair = interaction.crosshair();
        frame.hovered = interaction.hovered_point();
        frame.selected = interaction.selected_points().iter().copied().collect();
        frame
    }
}
