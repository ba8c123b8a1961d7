//! Observer hooks for host-side extensions.
//!
//! Plugins see events and a read-only context; they never reach engine
//! internals.

pub mod plugins;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
