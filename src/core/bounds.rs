use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, Dataset};

/// Numeric extent of one or more series.
///
/// When no finite value was seen, `min` is `+Inf`, `max` is `-Inf` and
/// `has_valid` is `false`; callers must check `has_valid` before feeding the
/// bounds into layout math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub has_valid: bool,
}

impl Bounds {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            has_valid: false,
        }
    }

    pub fn include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
        self.has_valid = true;
    }

    #[must_use]
    pub fn merge(mut self, other: Bounds) -> Self {
        if other.has_valid {
            self.include(other.min);
            self.include(other.max);
        }
        self
    }

    #[must_use]
    pub fn range(self) -> f64 {
        if self.has_valid {
            self.max - self.min
        } else {
            0.0
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

/// Computes bounds in a single iterative pass, skipping non-finite values.
#[must_use]
pub fn compute_bounds(points: &[DataPoint]) -> Bounds {
    bounds_of_values(points.iter().map(|point| point.value))
}

#[must_use]
pub fn bounds_of_values(values: impl IntoIterator<Item = f64>) -> Bounds {
    values.into_iter().fold(Bounds::empty(), |mut bounds, value| {
        bounds.include(value);
        bounds
    })
}

/// Bounds across all visible datasets.
#[must_use]
pub fn compute_datasets_bounds(datasets: &[Dataset]) -> Bounds {
    datasets
        .iter()
        .filter(|dataset| dataset.is_visible())
        .map(|dataset| compute_bounds(&dataset.data))
        .fold(Bounds::empty(), Bounds::merge)
}
