use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer that validates frames and records what they held.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_series_count: usize,
    pub last_point_count: usize,
    pub last_bar_count: usize,
    pub last_slice_count: usize,
    pub last_leaf_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_series_count = frame.series.len();
        self.last_point_count = frame.point_count();
        self.last_bar_count = frame.bars.len();
        self.last_slice_count = frame.pie.as_ref().map_or(0, |pie| pie.slices.len());
        self.last_leaf_count = frame
            .treemap
            .as_ref()
            .map_or(0, |treemap| treemap.leaves().count());
        Ok(())
    }
}
