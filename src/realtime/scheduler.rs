use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Opaque id of a scheduled timer, debounce window or frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchedulerHandle(u64);

/// Returned by frame callbacks to keep or drop their registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub frame: u64,
    pub delta: Duration,
    pub elapsed: Duration,
}

pub type FrameCallback = Box<dyn FnMut(FrameInfo) -> FrameControl>;

/// Timer work that became due during one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fired {
    /// Interval timer elapsed `count` times.
    Interval { handle: SchedulerHandle, count: u32 },
    /// Debounce window closed without a new trigger.
    Debounce { handle: SchedulerHandle },
}

#[derive(Debug, Clone, Copy)]
struct IntervalTimer {
    period: Duration,
    accumulated: Duration,
}

impl IntervalTimer {
    /// Whole periods in `accumulated`, keeping the remainder for the next tick.
    fn take_due(&mut self) -> u32 {
        let period = self.period.as_nanos();
        let accumulated = self.accumulated.as_nanos();
        let remainder = u64::try_from(accumulated % period).unwrap_or(u64::MAX);
        self.accumulated = Duration::from_nanos(remainder);
        u32::try_from(accumulated / period).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Copy)]
struct Debouncer {
    window: Duration,
    remaining: Option<Duration>,
}

/// Deterministic, tick-driven scheduler.
///
/// Time only moves when the host calls [`Scheduler::advance`]; nothing
/// blocks and nothing runs on another thread. Every registration is released
/// by `cancel` or `cancel_all`.
pub struct Scheduler {
    next_id: u64,
    elapsed: Duration,
    frame_count: u64,
    intervals: IndexMap<SchedulerHandle, IntervalTimer>,
    debouncers: IndexMap<SchedulerHandle, Debouncer>,
    frames: IndexMap<SchedulerHandle, FrameCallback>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("elapsed", &self.elapsed)
            .field("frame_count", &self.frame_count)
            .field("intervals", &self.intervals.len())
            .field("debouncers", &self.debouncers.len())
            .field("frames", &self.frames.len())
            .finish()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            elapsed: Duration::ZERO,
            frame_count: 0,
            intervals: IndexMap::new(),
            debouncers: IndexMap::new(),
            frames: IndexMap::new(),
        }
    }

    fn allocate(&mut self) -> SchedulerHandle {
        let handle = SchedulerHandle(self.next_id);
        self.next_id += 1;
        handle
    }

    /// Registers a repeating timer. A zero period is raised to one millisecond.
    pub fn schedule_interval(&mut self, period: Duration) -> SchedulerHandle {
        let handle = self.allocate();
        self.intervals.insert(
            handle,
            IntervalTimer {
                period: period.max(Duration::from_millis(1)),
                accumulated: Duration::ZERO,
            },
        );
        trace!(?handle, ?period, "scheduled interval");
        handle
    }

    /// Registers an idle debounce window; arm it with [`Scheduler::trigger`].
    pub fn create_debounce(&mut self, window: Duration) -> SchedulerHandle {
        let handle = self.allocate();
        self.debouncers.insert(
            handle,
            Debouncer {
                window,
                remaining: None,
            },
        );
        handle
    }

    /// (Re)starts a debounce window. Returns `false` for unknown handles.
    pub fn trigger(&mut self, handle: SchedulerHandle) -> bool {
        match self.debouncers.get_mut(&handle) {
            Some(debouncer) => {
                debouncer.remaining = Some(debouncer.window);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self, handle: SchedulerHandle) -> bool {
        self.debouncers
            .get(&handle)
            .is_some_and(|debouncer| debouncer.remaining.is_some())
    }

    /// Registers a callback run once per `advance` until it returns `Stop`.
    pub fn request_frame(&mut self, callback: FrameCallback) -> SchedulerHandle {
        let handle = self.allocate();
        self.frames.insert(handle, callback);
        handle
    }

    pub fn cancel(&mut self, handle: SchedulerHandle) -> bool {
        self.intervals.shift_remove(&handle).is_some()
            || self.debouncers.shift_remove(&handle).is_some()
            || self.frames.shift_remove(&handle).is_some()
    }

    pub fn cancel_all(&mut self) -> usize {
        let released = self.active_handles();
        self.intervals.clear();
        self.debouncers.clear();
        self.frames.clear();
        if released > 0 {
            debug!(released, "released scheduler handles");
        }
        released
    }

    #[must_use]
    pub fn active_handles(&self) -> usize {
        self.intervals.len() + self.debouncers.len() + self.frames.len()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Moves time forward by `delta`, runs one frame and reports due timers.
    pub fn advance(&mut self, delta: Duration) -> SmallVec<[Fired; 4]> {
        self.elapsed += delta;
        let mut fired = SmallVec::new();

        for (handle, timer) in &mut self.intervals {
            timer.accumulated = timer.accumulated.saturating_add(delta);
            let count = timer.take_due();
            if count > 0 {
                fired.push(Fired::Interval {
                    handle: *handle,
                    count,
                });
            }
        }

        for (handle, debouncer) in &mut self.debouncers {
            if let Some(remaining) = debouncer.remaining {
                if delta >= remaining {
                    debouncer.remaining = None;
                    fired.push(Fired::Debounce { handle: *handle });
                } else {
                    debouncer.remaining = Some(remaining - delta);
                }
            }
        }

        if !self.frames.is_empty() {
            self.frame_count += 1;
            let info = FrameInfo {
                frame: self.frame_count,
                delta,
                elapsed: self.elapsed,
            };
            self.frames
                .retain(|_, callback| callback(info) == FrameControl::Continue);
        }

        fired
    }
}
