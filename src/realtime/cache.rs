use std::rc::Rc;

use tracing::trace;

use crate::core::Dataset;

#[derive(Debug, Clone, PartialEq, Eq)]
struct DatasetPrint {
    visible: bool,
    values: Vec<u64>,
}

/// Structural fingerprint of a dataset snapshot: visibility, length and the
/// bit pattern of every value.
///
/// Datasets can be mutated in place, so identity is not enough to know
/// whether derived structures are stale; comparing fingerprints is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnapshotFingerprint {
    datasets: Vec<DatasetPrint>,
}

impl SnapshotFingerprint {
    #[must_use]
    pub fn of(datasets: &[Dataset]) -> Self {
        Self {
            datasets: datasets
                .iter()
                .map(|dataset| DatasetPrint {
                    visible: dataset.is_visible(),
                    values: dataset.data.iter().map(|point| point.value.to_bits()).collect(),
                })
                .collect(),
        }
    }

    /// Compares against a live snapshot without allocating.
    #[must_use]
    pub fn matches(&self, datasets: &[Dataset]) -> bool {
        self.datasets.len() == datasets.len()
            && self.datasets.iter().zip(datasets).all(|(print, dataset)| {
                print.visible == dataset.is_visible()
                    && print.values.len() == dataset.data.len()
                    && print
                        .values
                        .iter()
                        .zip(&dataset.data)
                        .all(|(bits, point)| *bits == point.value.to_bits())
            })
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.datasets.iter().map(|print| print.values.len()).sum()
    }
}

/// Single-slot cache keyed by a dataset fingerprint.
///
/// While the fingerprint matches, the same `Rc` is handed out again.
#[derive(Debug, Clone)]
pub struct SnapshotCache<T> {
    entry: Option<(SnapshotFingerprint, Rc<T>)>,
    hits: u64,
    misses: u64,
}

impl<T> Default for SnapshotCache<T> {
    fn default() -> Self {
        Self {
            entry: None,
            hits: 0,
            misses: 0,
        }
    }
}

/// Hit/miss counters exposed for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub populated: bool,
}

impl<T> SnapshotCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, datasets: &[Dataset], compute: impl FnOnce(&[Dataset]) -> T) -> Rc<T> {
        if let Some((fingerprint, value)) = &self.entry {
            if fingerprint.matches(datasets) {
                self.hits += 1;
                trace!(hits = self.hits, "snapshot cache hit");
                return Rc::clone(value);
            }
        }
        self.misses += 1;
        trace!(misses = self.misses, "snapshot cache miss");
        let value = Rc::new(compute(datasets));
        self.entry = Some((SnapshotFingerprint::of(datasets), Rc::clone(&value)));
        value
    }

    /// Cached value if it still matches `datasets`.
    #[must_use]
    pub fn peek(&self, datasets: &[Dataset]) -> Option<Rc<T>> {
        self.entry
            .as_ref()
            .filter(|(fingerprint, _)| fingerprint.matches(datasets))
            .map(|(_, value)| Rc::clone(value))
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    #[must_use]
    pub fn stats(&self) -> SnapshotCacheStats {
        SnapshotCacheStats {
            hits: self.hits,
            misses: self.misses,
            populated: self.entry.is_some(),
        }
    }
}
