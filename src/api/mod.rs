mod analytics_controller;
mod data_controller;
mod engine;
mod engine_config;
mod engine_core;
mod engine_init;
mod engine_snapshot;
mod interaction_controller;
mod layout_controller;
mod plugin_dispatch;
mod plugin_registry;
mod realtime_controller;
mod render_frame_builder;
mod validation;

pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use engine_snapshot::{EngineSnapshot, SNAPSHOT_SCHEMA_VERSION, SnapshotEnvelope};
pub use layout_controller::DEFAULT_DONUT_RATIO;
pub use realtime_controller::TickReport;

pub use crate::extensions::{PluginContext, PluginEvent};
