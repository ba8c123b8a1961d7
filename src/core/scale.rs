use serde::{Deserialize, Serialize};

use crate::core::bounds::{Bounds, compute_datasets_bounds};
use crate::core::{Dataset, Padding, Viewport};

/// Linear domain-to-range mapping.
///
/// A zero-width domain is floored to a span of `1.0` so mapping never divides
/// by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_start: f64,
    range_length: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain_min: f64, domain_max: f64, range_start: f64, range_length: f64) -> Self {
        Self {
            domain_min,
            domain_max,
            range_start,
            range_length,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_start + self.range_length)
    }

    #[must_use]
    fn span(self) -> f64 {
        let span = self.domain_max - self.domain_min;
        if span == 0.0 { 1.0 } else { span }
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_min) / self.span();
        self.range_start + normalized * self.range_length
    }

    #[must_use]
    pub fn invert(self, coordinate: f64) -> f64 {
        if self.range_length == 0.0 {
            return self.domain_min;
        }
        let normalized = (coordinate - self.range_start) / self.range_length;
        self.domain_min + normalized * self.span()
    }

    /// Maps the `index`-th of `len` evenly spaced slots onto the range.
    ///
    /// A single slot (or none) sits on the range midpoint.
    #[must_use]
    pub fn index_to_coordinate(self, index: usize, len: usize) -> f64 {
        if len <= 1 {
            return self.range_start + self.range_length * 0.5;
        }
        let t = index as f64 / (len - 1) as f64;
        self.range_start + t * self.range_length
    }
}

/// Zoom/pan transform applied on top of plot coordinates: `screen = plot * zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        zoom: 1.0,
        pan_x: 0.0,
        pan_y: 0.0,
    };

    #[must_use]
    pub fn apply(self, x: f64, y: f64) -> (f64, f64) {
        (x * self.zoom + self.pan_x, y * self.zoom + self.pan_y)
    }

    #[must_use]
    pub fn invert(self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.pan_x) / self.zoom, (y - self.pan_y) / self.zoom)
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Derived x/y mapping for one plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScale {
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub padding: Padding,
    #[serde(default)]
    pub view: ViewTransform,
}

impl ChartScale {
    /// Builds a scale from bounds; `None` when the bounds carry no valid value
    /// or the viewport is empty.
    #[must_use]
    pub fn from_bounds(bounds: Bounds, viewport: Viewport, padding: Padding) -> Option<Self> {
        if !bounds.has_valid || !viewport.is_valid() {
            return None;
        }
        let inner_width = (f64::from(viewport.width) - padding.left - padding.right).max(0.0);
        let inner_height = (f64::from(viewport.height) - padding.top - padding.bottom).max(0.0);
        Some(Self {
            min: bounds.min,
            max: bounds.max,
            range: bounds.max - bounds.min,
            inner_width,
            inner_height,
            padding,
            view: ViewTransform::IDENTITY,
        })
    }

    #[must_use]
    pub fn from_datasets(datasets: &[Dataset], viewport: Viewport, padding: Padding) -> Option<Self> {
        Self::from_bounds(compute_datasets_bounds(datasets), viewport, padding)
    }

    /// Value scale for bar charts: the domain always contains zero and, when
    /// stacked, the per-category positive and negative stack totals.
    #[must_use]
    pub fn for_bars(
        datasets: &[Dataset],
        viewport: Viewport,
        padding: Padding,
        stacked: bool,
    ) -> Option<Self> {
        let mut bounds = compute_datasets_bounds(datasets);
        if !bounds.has_valid {
            return None;
        }
        bounds.include(0.0);
        if stacked {
            let categories = category_count(datasets);
            let mut positive = vec![0.0_f64; categories];
            let mut negative = vec![0.0_f64; categories];
            for dataset in datasets.iter().filter(|dataset| dataset.is_visible()) {
                for (category, point) in dataset.data.iter().enumerate() {
                    if !point.value.is_finite() {
                        continue;
                    }
                    if point.value >= 0.0 {
                        positive[category] += point.value;
                    } else {
                        negative[category] += point.value;
                    }
                }
            }
            for total in positive.into_iter().chain(negative) {
                bounds.include(total);
            }
        }
        Self::from_bounds(bounds, viewport, padding)
    }

    #[must_use]
    pub fn with_view(mut self, view: ViewTransform) -> Self {
        self.view = view;
        self
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        LinearScale::new(0.0, 1.0, self.padding.left, self.inner_width)
    }

    /// Horizontal value axis, used by horizontal bar layouts.
    #[must_use]
    pub fn value_x_scale(&self) -> LinearScale {
        LinearScale::new(self.min, self.max, self.padding.left, self.inner_width)
    }

    /// Vertical value axis; larger values map to smaller coordinates.
    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        LinearScale::new(
            self.min,
            self.max,
            self.padding.top + self.inner_height,
            -self.inner_height,
        )
    }

    /// Plot x for the `index`-th of `len` points.
    #[must_use]
    pub fn x(&self, index: usize, len: usize) -> f64 {
        self.x_scale().index_to_coordinate(index, len)
    }

    /// Plot y for `value`.
    #[must_use]
    pub fn y(&self, value: f64) -> f64 {
        self.y_scale().map(value)
    }

    #[must_use]
    pub fn value_x(&self, value: f64) -> f64 {
        self.value_x_scale().map(value)
    }

    /// Screen position of a point after applying the view transform.
    #[must_use]
    pub fn project(&self, index: usize, len: usize, value: f64) -> (f64, f64) {
        self.view.apply(self.x(index, len), self.y(value))
    }
}

/// Number of categories (longest visible dataset).
#[must_use]
pub fn category_count(datasets: &[Dataset]) -> usize {
    datasets
        .iter()
        .filter(|dataset| dataset.is_visible())
        .map(Dataset::len)
        .max()
        .unwrap_or(0)
}
