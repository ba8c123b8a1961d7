use serde::{Deserialize, Serialize};

use crate::core::scale::category_count;
use crate::core::{ChartScale, Dataset, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BarOrientation {
    /// Categories along x, values grow upward.
    #[default]
    Vertical,
    /// Categories along y, values grow rightward.
    Horizontal,
}

/// Bar layout tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarLayoutConfig {
    #[serde(default)]
    pub orientation: BarOrientation,
    #[serde(default)]
    pub stacked: bool,
    /// Fraction of each category band left empty around the group, in `[0, 1)`.
    pub group_padding: f64,
    /// Pixels removed from every bar slot across the category axis.
    pub bar_padding: f64,
    /// Minimum bar length along the value axis for non-zero values.
    #[serde(default)]
    pub min_bar_height: f64,
    #[serde(default)]
    pub max_bar_width: Option<f64>,
}

impl Default for BarLayoutConfig {
    fn default() -> Self {
        Self {
            orientation: BarOrientation::Vertical,
            stacked: false,
            group_padding: 0.2,
            bar_padding: 2.0,
            min_bar_height: 0.0,
            max_bar_width: None,
        }
    }
}

/// Pixel geometry of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub dataset_index: usize,
    pub point_index: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Slot of one bar across the category axis: `(start, thickness)`.
#[derive(Debug, Clone, Copy)]
struct Slot {
    start: f64,
    thickness: f64,
}

impl Slot {
    fn inset(self, padding: f64) -> Self {
        let padding = padding.clamp(0.0, self.thickness);
        Self {
            start: self.start + padding * 0.5,
            thickness: self.thickness - padding,
        }
    }

    fn clamp_thickness(self, max: Option<f64>) -> Self {
        match max {
            Some(max) if max.is_finite() && max >= 0.0 && self.thickness > max => Self {
                start: self.start + (self.thickness - max) * 0.5,
                thickness: max,
            },
            _ => self,
        }
    }
}

/// Lays out grouped or stacked bars for every visible dataset.
///
/// Non-finite values produce no geometry and do not advance stacks.
#[must_use]
pub fn layout_bars(datasets: &[Dataset], scale: &ChartScale, config: &BarLayoutConfig) -> Vec<BarGeometry> {
    let visible: Vec<(usize, &Dataset)> = datasets
        .iter()
        .enumerate()
        .filter(|(_, dataset)| dataset.is_visible())
        .collect();
    let categories = category_count(datasets);
    if categories == 0 || visible.is_empty() {
        return Vec::new();
    }

    let (axis_start, axis_length) = match config.orientation {
        BarOrientation::Vertical => (scale.padding.left, scale.inner_width),
        BarOrientation::Horizontal => (scale.padding.top, scale.inner_height),
    };
    let band = axis_length / categories as f64;
    let group_padding = if config.group_padding.is_finite() {
        config.group_padding.clamp(0.0, 0.99)
    } else {
        0.0
    };
    let group_thickness = band * (1.0 - group_padding);

    let mut positive_stack = vec![0.0_f64; categories];
    let mut negative_stack = vec![0.0_f64; categories];
    let mut bars = Vec::with_capacity(categories * visible.len());

    for (slot_index, (dataset_index, dataset)) in visible.iter().enumerate() {
        for (category, point) in dataset.data.iter().enumerate() {
            let value = point.value;
            if !value.is_finite() {
                continue;
            }

            let group = Slot {
                start: axis_start + category as f64 * band + (band - group_thickness) * 0.5,
                thickness: group_thickness,
            };
            let slot = if config.stacked {
                group
            } else {
                let thickness = group.thickness / visible.len() as f64;
                Slot {
                    start: group.start + slot_index as f64 * thickness,
                    thickness,
                }
            }
            .inset(config.bar_padding)
            .clamp_thickness(config.max_bar_width);

            let (from, to) = if config.stacked {
                let stack = if value >= 0.0 {
                    &mut positive_stack[category]
                } else {
                    &mut negative_stack[category]
                };
                let from = *stack;
                *stack += value;
                (from, *stack)
            } else {
                (0.0, value)
            };

            let Some(bar) = place_bar(scale, config, slot, from, to) else {
                continue;
            };
            bars.push(BarGeometry {
                dataset_index: *dataset_index,
                point_index: category,
                value,
                ..bar
            });
        }
    }

    bars
}

fn place_bar(
    scale: &ChartScale,
    config: &BarLayoutConfig,
    slot: Slot,
    from: f64,
    to: f64,
) -> Option<BarGeometry> {
    let (base, end) = match config.orientation {
        BarOrientation::Vertical => (scale.y(from), scale.y(to)),
        BarOrientation::Horizontal => (scale.value_x(from), scale.value_x(to)),
    };
    if !base.is_finite() || !end.is_finite() {
        return None;
    }

    let mut length = (end - base).abs();
    let mut lo = base.min(end);
    if to != from && config.min_bar_height > 0.0 && length < config.min_bar_height {
        // Grow away from the baseline so stacked neighbours keep their anchor.
        length = config.min_bar_height;
        lo = if end < base { base - length } else { base };
    }

    let geometry = match config.orientation {
        BarOrientation::Vertical => BarGeometry {
            dataset_index: 0,
            point_index: 0,
            value: to - from,
            x: slot.start,
            y: lo,
            width: slot.thickness,
            height: length,
        },
        BarOrientation::Horizontal => BarGeometry {
            dataset_index: 0,
            point_index: 0,
            value: to - from,
            x: lo,
            y: slot.start,
            width: length,
            height: slot.thickness,
        },
    };
    geometry.rect().is_finite().then_some(geometry)
}
