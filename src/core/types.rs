use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::primitives::{datetime_to_label, decimal_to_f64};
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Plot-area insets in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(40.0)
    }
}

/// Which geometry the engine produces for its datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Pie,
    Donut,
    Treemap,
}

/// Axis-aligned rectangle in pixel space (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn area(self) -> f64 {
        self.width * self.height
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Returns `true` when both rectangles share interior area beyond `epsilon`.
    #[must_use]
    pub fn overlaps(self, other: Rect, epsilon: f64) -> bool {
        let overlap_w = self.right().min(other.right()) - self.x.max(other.x);
        let overlap_h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        overlap_w > epsilon && overlap_h > epsilon
    }
}

/// One labelled sample of a dataset.
///
/// `value` is kept as `f64`; JSON payloads with a non-numeric value are loaded
/// as `NaN` and excluded from layout and statistics instead of failing the
/// whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    #[serde(deserialize_with = "lenient_value")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, serde_json::Value>,
}

impl DataPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
            metadata: IndexMap::new(),
        }
    }

    pub fn from_decimal(label: impl Into<String>, value: Decimal) -> ChartResult<Self> {
        Ok(Self::new(label, decimal_to_f64(value, "value")?))
    }

    /// Builds a sample labelled by its RFC 3339 timestamp, as produced by live feeds.
    #[must_use]
    pub fn from_time(time: DateTime<Utc>, value: f64) -> Self {
        Self::new(datetime_to_label(time), value)
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.value.is_finite()
    }
}

pub(crate) fn lenient_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_f64().unwrap_or(f64::NAN))
}

/// Named ordered sequence of data points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    #[serde(default)]
    pub data: Vec<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl Dataset {
    #[must_use]
    pub fn new(label: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self {
            label: label.into(),
            data,
            color: None,
            visible: None,
        }
    }

    /// Convenience constructor labelling points by their index.
    #[must_use]
    pub fn from_values(label: impl Into<String>, values: &[f64]) -> Self {
        let data = values
            .iter()
            .enumerate()
            .map(|(index, value)| DataPoint::new(index.to_string(), *value))
            .collect();
        Self::new(label, data)
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    /// Finite values in data order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.data
            .iter()
            .map(|point| point.value)
            .filter(|value| value.is_finite())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
