use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{DataPoint, Dataset};

/// Real-time feed tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    /// Retention cap per dataset; older points are dropped first.
    pub max_data_points: usize,
    /// Nominal feed interval; buffers flush every quarter of it.
    pub update_interval_ms: u64,
    /// Decimation threshold for render output, independent from retention.
    #[serde(default)]
    pub render_max_points: Option<usize>,
    /// Window used to coalesce consecutive recomputations.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    50
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            max_data_points: 1_000,
            update_interval_ms: 1_000,
            render_max_points: None,
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl RealtimeConfig {
    /// Flush period: a quarter of the update interval, never zero.
    #[must_use]
    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis((self.update_interval_ms / 4).max(1))
    }

    #[must_use]
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PendingPoint {
    dataset_index: usize,
    point: DataPoint,
}

/// Summary of one flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlushReport {
    pub appended: usize,
    /// Points removed by retention.
    pub dropped: usize,
    /// Points addressed to a dataset that does not exist.
    pub rejected: usize,
}

impl FlushReport {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.appended > 0 || self.dropped > 0
    }
}

/// Arrival-ordered staging area for live points.
#[derive(Debug, Clone, Default)]
pub struct RealtimeBuffer {
    pending: Vec<PendingPoint>,
    max_data_points: usize,
}

impl RealtimeBuffer {
    #[must_use]
    pub fn new(max_data_points: usize) -> Self {
        Self {
            pending: Vec::new(),
            max_data_points,
        }
    }

    #[must_use]
    pub fn max_data_points(&self) -> usize {
        self.max_data_points
    }

    pub fn set_max_data_points(&mut self, max_data_points: usize) {
        self.max_data_points = max_data_points;
    }

    /// Trims every dataset to `max_data_points`, oldest first; returns how
    /// many points were removed.
    pub fn enforce_retention(&self, datasets: &mut [Dataset]) -> usize {
        datasets
            .iter_mut()
            .map(|dataset| truncate_oldest(&mut dataset.data, self.max_data_points))
            .sum()
    }

    pub fn push(&mut self, dataset_index: usize, point: DataPoint) {
        self.pending.push(PendingPoint {
            dataset_index,
            point,
        });
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Appends every pending point to its dataset, then trims every dataset
    /// to `max_data_points` from the front.
    pub fn flush_into(&mut self, datasets: &mut [Dataset]) -> FlushReport {
        let mut report = FlushReport::default();
        if self.pending.is_empty() {
            return report;
        }

        for pending in self.pending.drain(..) {
            match datasets.get_mut(pending.dataset_index) {
                Some(dataset) => {
                    dataset.data.push(pending.point);
                    report.appended += 1;
                }
                None => report.rejected += 1,
            }
        }
        report.dropped = self.enforce_retention(datasets);

        if report.rejected > 0 {
            warn!(
                rejected = report.rejected,
                datasets = datasets.len(),
                "discarded realtime points for unknown datasets"
            );
        }
        debug!(
            appended = report.appended,
            dropped = report.dropped,
            "flushed realtime buffer"
        );
        report
    }
}

/// Drops the oldest entries so at most `max_len` remain; returns how many were removed.
pub fn truncate_oldest<T>(data: &mut Vec<T>, max_len: usize) -> usize {
    if data.len() <= max_len {
        return 0;
    }
    let excess = data.len() - max_len;
    data.drain(..excess);
    excess
}
