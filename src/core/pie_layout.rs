use std::f64::consts::TAU;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Dataset, Padding, Viewport};

/// Pie/donut slicing options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieLayoutConfig {
    /// Gap between consecutive slices in radians.
    #[serde(default)]
    pub pad_angle: f64,
    #[serde(default)]
    pub sort_by_value: bool,
    /// Angle of the first slice start in radians.
    #[serde(default)]
    pub start_angle: f64,
    /// Inner radius as a fraction of the outer radius; `> 0` yields a donut.
    #[serde(default)]
    pub inner_radius_ratio: f64,
}

impl Default for PieLayoutConfig {
    fn default() -> Self {
        Self {
            pad_angle: 0.0,
            sort_by_value: false,
            start_angle: 0.0,
            inner_radius_ratio: 0.0,
        }
    }
}

impl PieLayoutConfig {
    #[must_use]
    pub fn donut(inner_radius_ratio: f64) -> Self {
        Self {
            inner_radius_ratio,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    /// Index of the source point inside the dataset.
    pub point_index: usize,
    pub label: String,
    pub value: f64,
    /// Share of the total in `[0, 1]`.
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) * 0.5
    }
}

/// Circle placement inside the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PieLayout {
    pub total: f64,
    pub slices: Vec<PieSlice>,
    #[serde(default)]
    pub geometry: Option<PieGeometry>,
}

impl PieLayout {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Adds center and radii for the given plot area.
    #[must_use]
    pub fn with_geometry(
        mut self,
        viewport: Viewport,
        padding: Padding,
        inner_radius_ratio: f64,
    ) -> Self {
        let width = (f64::from(viewport.width) - padding.left - padding.right).max(0.0);
        let height = (f64::from(viewport.height) - padding.top - padding.bottom).max(0.0);
        let outer_radius = width.min(height) * 0.5;
        let ratio = if inner_radius_ratio.is_finite() {
            inner_radius_ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.geometry = Some(PieGeometry {
            center_x: padding.left + width * 0.5,
            center_y: padding.top + height * 0.5,
            outer_radius,
            inner_radius: outer_radius * ratio,
        });
        self
    }

    /// Slice containing `angle` (radians, any winding), if any.
    #[must_use]
    pub fn slice_at_angle(&self, angle: f64) -> Option<&PieSlice> {
        let first = self.slices.first()?.start_angle;
        let relative = (angle - first).rem_euclid(TAU) + first;
        self.slices
            .iter()
            .find(|slice| relative >= slice.start_angle && relative < slice.end_angle)
    }
}

/// Computes angular slices for one dataset.
///
/// Non-positive and non-finite values are dropped first; a non-positive
/// total yields an empty layout.
#[must_use]
pub fn layout_pie(dataset: &Dataset, config: &PieLayoutConfig) -> PieLayout {
    let mut entries: Vec<(usize, &str, f64)> = dataset
        .data
        .iter()
        .enumerate()
        .filter(|(_, point)| point.value.is_finite() && point.value > 0.0)
        .map(|(index, point)| (index, point.label.as_str(), point.value))
        .collect();

    if config.sort_by_value {
        entries.sort_by_key(|(_, _, value)| std::cmp::Reverse(OrderedFloat(*value)));
    }

    let total: f64 = entries.iter().map(|(_, _, value)| value).sum();
    if !total.is_finite() || total <= 0.0 {
        return PieLayout::default();
    }

    let pad_angle = if config.pad_angle.is_finite() {
        config.pad_angle.max(0.0)
    } else {
        0.0
    };
    let mut current = config.start_angle;
    let mut slices = Vec::with_capacity(entries.len());
    for (point_index, label, value) in entries {
        let fraction = value / total;
        let share = fraction * TAU;
        // Padding is capped at the slice's share; the sweep ends at start + TAU.
        let pad = pad_angle.min(share);
        let end_angle = current + (share - pad);
        if !share.is_finite() || !end_angle.is_finite() {
            continue;
        }
        slices.push(PieSlice {
            point_index,
            label: label.to_owned(),
            value,
            fraction,
            start_angle: current,
            end_angle,
        });
        current = end_angle + pad;
    }

    PieLayout {
        total,
        slices,
        geometry: None,
    }
}
