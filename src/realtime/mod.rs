//! Live-data plumbing: buffered appends with bounded retention, render
//! decimation, fingerprint-based change detection and the tick-driven
//! scheduler that drives flushes, debounced recomputation and frame callbacks.

mod buffer;
mod cache;
mod scheduler;

pub use crate::core::windowing::decimate;
pub use buffer::{FlushReport, RealtimeBuffer, RealtimeConfig, truncate_oldest};
pub use cache::{SnapshotCache, SnapshotCacheStats, SnapshotFingerprint};
pub use scheduler::{
    Fired, FrameCallback, FrameControl, FrameInfo, Scheduler, SchedulerHandle,
};
