//! chart-compute: framework-independent computation core for chart components.
//!
//! The crate turns datasets into plot geometry (scales, bars, pie slices,
//! squarified treemaps), runs the pointer/touch/pen/keyboard interaction state
//! machine, buffers live data with bounded retention and computes series
//! analytics. Drawing is left to a [`render::Renderer`] implementation.
//!
//! Everything is synchronous and owned by a [`ChartEngine`] instance.

pub mod analytics;
pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod realtime;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
