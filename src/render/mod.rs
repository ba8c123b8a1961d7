mod frame;
mod null_renderer;

pub use frame::{RenderFrame, SeriesPath};
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`; they never see
/// datasets, scales or interaction internals.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
