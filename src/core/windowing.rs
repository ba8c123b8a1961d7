use std::borrow::Cow;

use crate::core::DataPoint;

/// Fixed-stride subsample for rendering.
///
/// When `points.len()` exceeds `max_points`, keeps every `step`-th point with
/// `step = ceil(len / max_points)`; otherwise borrows the input unchanged.
/// The retained buffer is never touched.
#[must_use]
pub fn decimate(points: &[DataPoint], max_points: usize) -> Cow<'_, [DataPoint]> {
    let step = decimation_step(points.len(), max_points);
    if step == 1 {
        return Cow::Borrowed(points);
    }
    Cow::Owned(points.iter().step_by(step).cloned().collect())
}

/// Stride used by [`decimate`]; `1` keeps everything.
#[must_use]
pub fn decimation_step(len: usize, max_points: usize) -> usize {
    if max_points == 0 || len <= max_points {
        1
    } else {
        len.div_ceil(max_points)
    }
}

/// Returns points whose index falls inside an inclusive index window.
#[must_use]
pub fn points_in_index_window(points: &[DataPoint], start: usize, end: usize) -> &[DataPoint] {
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
    if lo >= points.len() {
        return &[];
    }
    &points[lo..=hi.min(points.len() - 1)]
}
