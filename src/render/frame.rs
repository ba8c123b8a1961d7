use std::rc::Rc;

use crate::core::{BarGeometry, ChartKind, PieLayout, TreemapLayout, ViewTransform, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{CrosshairPosition, PointRef};

/// Projected polyline of one visible dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPath {
    pub dataset_index: usize,
    pub label: String,
    pub color: Option<String>,
    /// Screen positions with the view transform already applied.
    pub points: Vec<(f64, f64)>,
}

/// Backend-agnostic geometry for one draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub chart_kind: ChartKind,
    pub view: ViewTransform,
    pub series: Rc<Vec<SeriesPath>>,
    pub bars: Vec<BarGeometry>,
    pub pie: Option<Rc<PieLayout>>,
    pub treemap: Option<Rc<TreemapLayout>>,
    pub crosshair: Option<CrosshairPosition>,
    pub hovered: Option<PointRef>,
    pub selected: Vec<PointRef>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, chart_kind: ChartKind) -> Self {
        Self {
            viewport,
            chart_kind,
            view: ViewTransform::IDENTITY,
            series: Rc::default(),
            bars: Vec::new(),
            pie: None,
            treemap: None,
            crosshair: None,
            hovered: None,
            selected: Vec::new(),
        }
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|series| series.points.len()).sum()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for series in self.series.iter() {
            if let Some(index) = series
                .points
                .iter()
                .position(|(x, y)| !x.is_finite() || !y.is_finite())
            {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` has a non-finite vertex at {index}",
                    series.label
                )));
            }
        }
        for bar in &self.bars {
            if !bar.rect().is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "bar {}/{} has non-finite geometry",
                    bar.dataset_index, bar.point_index
                )));
            }
        }
        if let Some(pie) = &self.pie {
            if pie
                .slices
                .iter()
                .any(|slice| !slice.start_angle.is_finite() || !slice.end_angle.is_finite())
            {
                return Err(ChartError::InvalidData(
                    "pie slice angles must be finite".to_owned(),
                ));
            }
        }
        if let Some(treemap) = &self.treemap {
            if let Some(node) = treemap.nodes.iter().find(|node| !node.rect().is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "treemap node `{}` has non-finite geometry",
                    node.id
                )));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
            && self.bars.is_empty()
            && self.pie.as_ref().is_none_or(|pie| pie.is_empty())
            && self.treemap.as_ref().is_none_or(|treemap| treemap.nodes.is_empty())
    }
}
