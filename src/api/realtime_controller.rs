use std::borrow::Cow;
use std::time::Duration;

use tracing::trace;

use crate::core::{DataPoint, decimate};
use crate::error::ChartResult;
use crate::realtime::{FlushReport, Fired, FrameCallback, SchedulerHandle};
use crate::render::Renderer;

use super::validation::validate_dataset_index;
use super::{ChartEngine, PluginEvent};

/// What one [`ChartEngine::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub flush: FlushReport,
    pub analytics_refreshed: bool,
}

impl<R: Renderer> ChartEngine<R> {
    /// Queues a live point; it lands in the dataset on the next flush.
    pub fn push_realtime_point(&mut self, dataset_index: usize, point: DataPoint) -> ChartResult<()> {
        validate_dataset_index(dataset_index, self.core.datasets.len())?;
        self.core.realtime.push(dataset_index, point);
        Ok(())
    }

    #[must_use]
    pub fn pending_realtime_points(&self) -> usize {
        self.core.realtime.pending_len()
    }

    /// Merges buffered points now instead of waiting for the flush timer.
    pub fn flush_realtime(&mut self) -> FlushReport {
        let report = self.core.realtime.flush_into(&mut self.core.datasets);
        if report.changed() {
            self.core.scheduler.trigger(self.core.recompute);
            self.emit_plugin_event(PluginEvent::RealtimeFlushed {
                appended: report.appended,
                dropped: report.dropped,
            });
        }
        report
    }

    /// Moves engine time forward: flushes on the flush timer, refreshes
    /// analytics when the recompute debounce settles and runs frame callbacks.
    pub fn advance(&mut self, delta: Duration) -> TickReport {
        let mut report = TickReport::default();
        for fired in self.core.scheduler.advance(delta) {
            match fired {
                Fired::Interval { handle, count } if handle == self.core.flush_timer => {
                    trace!(count, "flush timer elapsed");
                    report.flush = self.flush_realtime();
                }
                Fired::Debounce { handle } if handle == self.core.recompute => {
                    self.refresh_analytics();
                    report.analytics_refreshed = true;
                }
                Fired::Interval { .. } | Fired::Debounce { .. } => {}
            }
        }
        report
    }

    /// Runs `callback` on every `advance` until it returns `Stop` or is cancelled.
    pub fn request_frame(&mut self, callback: FrameCallback) -> SchedulerHandle {
        self.core.scheduler.request_frame(callback)
    }

    pub fn cancel_frame(&mut self, handle: SchedulerHandle) -> bool {
        if handle == self.core.flush_timer || handle == self.core.recompute {
            return false;
        }
        self.core.scheduler.cancel(handle)
    }

    /// Points of one dataset thinned to `realtime.render_max_points`.
    pub fn decimated_points(&self, dataset_index: usize) -> ChartResult<Cow<'_, [DataPoint]>> {
        let dataset = self.dataset(dataset_index)?;
        Ok(match self.core.config.realtime.render_max_points {
            Some(max_points) => decimate(&dataset.data, max_points),
            None => Cow::Borrowed(dataset.data.as_slice()),
        })
    }
}
