use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, Viewport};
use crate::interaction::{InteractionMode, PointRef};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub chart_kind: ChartKind,
    pub datasets_len: usize,
    pub points_len: usize,
    pub interaction_mode: InteractionMode,
    pub zoom_level: f64,
    pub selected_len: usize,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    DatasetsUpdated { datasets_len: usize, points_len: usize },
    RealtimeFlushed { appended: usize, dropped: usize },
    ViewportChanged { width: u32, height: u32 },
    PointActivated(PointRef),
    SelectionChanged { selected_len: usize },
    ViewChanged { zoom: f64, pan_x: f64, pan_y: f64 },
    CrosshairMoved { x: f64, y: f64 },
    PointerLeft,
    AnalyticsUpdated { anomalies: usize },
    Rendered,
}

/// Extension hook interface.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
