//! Pointer/touch/pen/keyboard interaction state machine.
//!
//! All input flows through [`InteractionState::apply`]. Zoom and pan updates
//! are validated before they are stored; non-finite results are dropped and
//! leave the state untouched.

mod input;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::ViewTransform;

pub use input::{
    InteractionEvent, Modifiers, NavigationKey, PointRef, PointerInput, PointerPhase, TouchList,
    TouchPoint,
};
use input::{centroid, pinch_distance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Hovering,
    /// Pointer or single-touch pan in progress.
    Dragging,
    /// Two-contact zoom; panning is suppressed.
    Pinching,
    /// Pointer pressed on a data point, waiting for release.
    Selecting,
}

/// Tuning for the interaction reducer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    #[serde(default = "default_true")]
    pub pan_enabled: bool,
    #[serde(default)]
    pub max_selection: Option<usize>,
    /// Wheel zoom factor is `1 - delta_y * wheel_sensitivity`.
    pub wheel_sensitivity: f64,
    /// Multiplier applied to raw single-touch deltas.
    pub touch_pan_damping: f64,
    /// Touch moves shorter than this many pixels are ignored.
    pub touch_jitter_px: f64,
}

fn default_true() -> bool {
    true
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.1,
            zoom_max: 10.0,
            pan_enabled: true,
            max_selection: None,
            wheel_sensitivity: 0.001,
            touch_pan_damping: 0.6,
            touch_jitter_px: 1.0,
        }
    }
}

impl InteractionConfig {
    /// Both bounds finite with `0 < zoom_min <= zoom_max`.
    #[must_use]
    pub fn has_valid_zoom_range(&self) -> bool {
        self.zoom_min.is_finite()
            && self.zoom_max.is_finite()
            && self.zoom_min > 0.0
            && self.zoom_min <= self.zoom_max
    }
}

/// Facts about the focused series needed for keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationContext {
    pub dataset_index: usize,
    pub point_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchState {
    pub active_touches: usize,
    pub last_distance: Option<f64>,
    pub last_centroid: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PenState {
    pub active: bool,
    pub pressure: f64,
    pub tilt_x: f64,
    pub tilt_y: f64,
}

/// What a single event changed, for hosts and plugin dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionOutcome {
    /// Point clicked or activated from the keyboard.
    pub activated: Option<PointRef>,
    pub selection_changed: bool,
    pub view_changed: bool,
    pub crosshair_changed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    mode: InteractionMode,
    hovered_point: Option<PointRef>,
    selected_points: IndexSet<PointRef>,
    zoom_level: f64,
    pan_offset: PanOffset,
    pan_enabled: bool,
    is_dragging: bool,
    drag_start: Option<(f64, f64)>,
    last_pointer: Option<(f64, f64)>,
    pending_target: Option<PointRef>,
    crosshair: Option<CrosshairPosition>,
    touch_state: TouchState,
    pen_state: PenState,
    focused_point_index: usize,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InteractionState {
    #[must_use]
    pub fn new(pan_enabled: bool) -> Self {
        Self {
            mode: InteractionMode::Idle,
            hovered_point: None,
            selected_points: IndexSet::new(),
            zoom_level: 1.0,
            pan_offset: PanOffset::default(),
            pan_enabled,
            is_dragging: false,
            drag_start: None,
            last_pointer: None,
            pending_target: None,
            crosshair: None,
            touch_state: TouchState::default(),
            pen_state: PenState::default(),
            focused_point_index: 0,
        }
    }

    #[must_use]
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(config.pan_enabled)
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn hovered_point(&self) -> Option<PointRef> {
        self.hovered_point
    }

    /// Selected points, oldest first.
    #[must_use]
    pub fn selected_points(&self) -> &IndexSet<PointRef> {
        &self.selected_points
    }

    #[must_use]
    pub fn is_selected(&self, point: PointRef) -> bool {
        self.selected_points.contains(&point)
    }

    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    #[must_use]
    pub fn pan_offset(&self) -> PanOffset {
        self.pan_offset
    }

    #[must_use]
    pub fn view_transform(&self) -> ViewTransform {
        ViewTransform {
            zoom: self.zoom_level,
            pan_x: self.pan_offset.x,
            pan_y: self.pan_offset.y,
        }
    }

    #[must_use]
    pub fn pan_enabled(&self) -> bool {
        self.pan_enabled
    }

    pub fn set_pan_enabled(&mut self, enabled: bool) {
        self.pan_enabled = enabled;
        if !enabled && self.mode == InteractionMode::Dragging {
            self.end_drag(InteractionMode::Hovering);
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    #[must_use]
    pub fn drag_start(&self) -> Option<(f64, f64)> {
        self.drag_start
    }

    #[must_use]
    pub fn crosshair(&self) -> Option<CrosshairPosition> {
        self.crosshair
    }

    #[must_use]
    pub fn touch_state(&self) -> TouchState {
        self.touch_state
    }

    #[must_use]
    pub fn pen_state(&self) -> PenState {
        self.pen_state
    }

    #[must_use]
    pub fn focused_point_index(&self) -> usize {
        self.focused_point_index
    }

    /// Restores the initial view: zoom 1, no pan, nothing hovered, selected or
    /// in progress. `pan_enabled` is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.pan_enabled);
    }

    /// Runs one event through the state machine.
    pub fn apply(
        &mut self,
        event: &InteractionEvent,
        config: &InteractionConfig,
        navigation: NavigationContext,
    ) -> InteractionOutcome {
        let mut outcome = InteractionOutcome::default();
        match event {
            InteractionEvent::Pointer {
                phase,
                input,
                target,
                ..
            } => match input {
                PointerInput::Mouse { x, y } => {
                    self.pointer(*phase, *x, *y, *target, config, &mut outcome);
                }
                PointerInput::Pen {
                    x,
                    y,
                    pressure,
                    tilt_x,
                    tilt_y,
                } => {
                    self.pen_state = PenState {
                        active: matches!(phase, PointerPhase::Down | PointerPhase::Move)
                            && (self.pen_state.active || *phase == PointerPhase::Down),
                        pressure: *pressure,
                        tilt_x: *tilt_x,
                        tilt_y: *tilt_y,
                    };
                    self.pointer(*phase, *x, *y, *target, config, &mut outcome);
                }
                PointerInput::Touch(touches) => {
                    self.touch(*phase, touches, config, &mut outcome);
                }
            },
            InteractionEvent::Wheel {
                delta_y,
                x,
                y,
                modifiers,
            } => {
                outcome.view_changed = if modifiers.shift {
                    self.pan_by(-delta_y, 0.0)
                } else {
                    let factor = 1.0 - delta_y * config.wheel_sensitivity;
                    self.zoom_at(*x, *y, factor, config)
                };
            }
            InteractionEvent::Key(key) => self.key(*key, navigation, config, &mut outcome),
            InteractionEvent::Reset => {
                let was_default = self.zoom_level == 1.0
                    && self.pan_offset == PanOffset::default()
                    && self.selected_points.is_empty();
                self.reset();
                outcome.view_changed = !was_default;
                outcome.selection_changed = !was_default;
            }
        }
        outcome
    }

    /// Multiplies zoom by `factor` around `(center_x, center_y)`, keeping that
    /// point stationary on screen. Returns `true` when the view changed.
    pub fn zoom_at(
        &mut self,
        center_x: f64,
        center_y: f64,
        factor: f64,
        config: &InteractionConfig,
    ) -> bool {
        if !factor.is_finite() || factor <= 0.0 || !center_x.is_finite() || !center_y.is_finite() {
            trace!(factor, center_x, center_y, "dropping invalid zoom update");
            return false;
        }
        if !config.has_valid_zoom_range() {
            trace!(
                zoom_min = config.zoom_min,
                zoom_max = config.zoom_max,
                "dropping zoom update for invalid zoom range"
            );
            return false;
        }
        let old_zoom = self.zoom_level;
        let new_zoom = (old_zoom * factor).clamp(config.zoom_min, config.zoom_max);
        if !new_zoom.is_finite() || new_zoom <= 0.0 {
            trace!(new_zoom, "dropping non-finite zoom level");
            return false;
        }
        let ratio = new_zoom / old_zoom;
        let pan_x = center_x - (center_x - self.pan_offset.x) * ratio;
        let pan_y = center_y - (center_y - self.pan_offset.y) * ratio;
        if !pan_x.is_finite() || !pan_y.is_finite() {
            trace!(pan_x, pan_y, "dropping non-finite zoom pan offset");
            return false;
        }
        let changed = new_zoom != old_zoom;
        self.zoom_level = new_zoom;
        self.pan_offset = PanOffset { x: pan_x, y: pan_y };
        changed
    }

    /// Adds a pixel delta to the pan offset when panning is enabled.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        if !self.pan_enabled {
            return false;
        }
        let x = self.pan_offset.x + dx;
        let y = self.pan_offset.y + dy;
        if !x.is_finite() || !y.is_finite() {
            trace!(dx, dy, "dropping invalid pan update");
            return false;
        }
        let changed = dx != 0.0 || dy != 0.0;
        self.pan_offset = PanOffset { x, y };
        changed
    }

    /// Toggles membership of `point`, evicting the oldest selection first when
    /// `max_selection` is reached.
    pub fn toggle_selection(&mut self, point: PointRef, max_selection: Option<usize>) -> bool {
        if self.selected_points.shift_remove(&point) {
            return true;
        }
        if let Some(max) = max_selection {
            if max == 0 {
                return false;
            }
            while self.selected_points.len() >= max {
                self.selected_points.shift_remove_index(0);
            }
        }
        self.selected_points.insert(point)
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = !self.selected_points.is_empty();
        self.selected_points.clear();
        changed
    }

    fn activate(&mut self, point: PointRef, config: &InteractionConfig, outcome: &mut InteractionOutcome) {
        outcome.selection_changed |= self.toggle_selection(point, config.max_selection);
        outcome.activated = Some(point);
    }

    fn set_crosshair(&mut self, x: f64, y: f64, outcome: &mut InteractionOutcome) {
        if x.is_finite() && y.is_finite() {
            self.crosshair = Some(CrosshairPosition { x, y });
            outcome.crosshair_changed = true;
        }
    }

    fn clear_crosshair(&mut self, outcome: &mut InteractionOutcome) {
        if self.crosshair.take().is_some() {
            outcome.crosshair_changed = true;
        }
    }

    fn begin_drag(&mut self, x: f64, y: f64) {
        self.mode = InteractionMode::Dragging;
        self.is_dragging = true;
        self.drag_start = Some((x, y));
        self.last_pointer = Some((x, y));
    }

    fn end_drag(&mut self, next: InteractionMode) {
        self.mode = next;
        self.is_dragging = false;
        self.drag_start = None;
        self.last_pointer = None;
        self.pending_target = None;
    }

    fn pointer(
        &mut self,
        phase: PointerPhase,
        x: f64,
        y: f64,
        target: Option<PointRef>,
        config: &InteractionConfig,
        outcome: &mut InteractionOutcome,
    ) {
        match phase {
            PointerPhase::Down => {
                self.hovered_point = target;
                if let Some(target) = target {
                    self.mode = InteractionMode::Selecting;
                    self.pending_target = Some(target);
                    self.drag_start = Some((x, y));
                    self.last_pointer = Some((x, y));
                } else if self.pan_enabled {
                    self.begin_drag(x, y);
                } else {
                    self.mode = InteractionMode::Hovering;
                }
            }
            PointerPhase::Move => {
                self.set_crosshair(x, y, outcome);
                self.hovered_point = target;
                match self.mode {
                    InteractionMode::Dragging => {
                        if let Some((last_x, last_y)) = self.last_pointer {
                            outcome.view_changed |= self.pan_by(x - last_x, y - last_y);
                        }
                        self.last_pointer = Some((x, y));
                    }
                    InteractionMode::Selecting => {
                        // Pressing on a point and moving away turns into a pan.
                        let moved = self.drag_start.is_some_and(|(sx, sy)| {
                            (x - sx).hypot(y - sy) > config.touch_jitter_px.max(1.0)
                        });
                        if moved && self.pan_enabled {
                            let (sx, sy) = self.drag_start.unwrap_or((x, y));
                            self.pending_target = None;
                            self.begin_drag(sx, sy);
                            outcome.view_changed |= self.pan_by(x - sx, y - sy);
                            self.last_pointer = Some((x, y));
                        }
                    }
                    InteractionMode::Idle => self.mode = InteractionMode::Hovering,
                    InteractionMode::Hovering | InteractionMode::Pinching => {}
                }
            }
            PointerPhase::Up => {
                if self.mode == InteractionMode::Selecting {
                    if let Some(point) = self.pending_target {
                        self.activate(point, config, outcome);
                    }
                }
                self.end_drag(InteractionMode::Hovering);
            }
            PointerPhase::Leave => {
                self.hovered_point = None;
                self.pen_state.active = false;
                self.clear_crosshair(outcome);
                self.end_drag(InteractionMode::Idle);
            }
        }
    }

    fn begin_pinch(&mut self, touches: &[TouchPoint]) {
        self.mode = InteractionMode::Pinching;
        self.is_dragging = false;
        self.drag_start = None;
        self.last_pointer = None;
        self.pending_target = None;
        self.touch_state.last_distance = Some(pinch_distance(touches[0], touches[1]));
        self.touch_state.last_centroid = centroid(&touches[..2]);
    }

    fn begin_single_touch(&mut self, touch: TouchPoint, outcome: &mut InteractionOutcome) {
        self.touch_state.last_distance = None;
        self.touch_state.last_centroid = Some((touch.x, touch.y));
        if self.pan_enabled {
            self.begin_drag(touch.x, touch.y);
        } else {
            self.end_drag(InteractionMode::Hovering);
            self.set_crosshair(touch.x, touch.y, outcome);
        }
    }

    fn touch(
        &mut self,
        phase: PointerPhase,
        touches: &[TouchPoint],
        config: &InteractionConfig,
        outcome: &mut InteractionOutcome,
    ) {
        self.touch_state.active_touches = touches.len();
        match (phase, touches.len()) {
            (PointerPhase::Leave, _) | (_, 0) => {
                self.touch_state = TouchState::default();
                self.clear_crosshair(outcome);
                self.end_drag(InteractionMode::Idle);
            }
            (PointerPhase::Down | PointerPhase::Up, 1) => {
                self.begin_single_touch(touches[0], outcome);
            }
            (PointerPhase::Down | PointerPhase::Up, _) => self.begin_pinch(touches),
            (PointerPhase::Move, 1) => {
                let touch = touches[0];
                if self.mode == InteractionMode::Pinching {
                    self.begin_single_touch(touch, outcome);
                    return;
                }
                if self.mode != InteractionMode::Dragging {
                    self.set_crosshair(touch.x, touch.y, outcome);
                    return;
                }
                let Some((last_x, last_y)) = self.last_pointer else {
                    self.last_pointer = Some((touch.x, touch.y));
                    return;
                };
                let (dx, dy) = (touch.x - last_x, touch.y - last_y);
                if dx.hypot(dy) < config.touch_jitter_px {
                    return;
                }
                outcome.view_changed |= self.pan_by(
                    dx * config.touch_pan_damping,
                    dy * config.touch_pan_damping,
                );
                self.last_pointer = Some((touch.x, touch.y));
                self.touch_state.last_centroid = Some((touch.x, touch.y));
            }
            (PointerPhase::Move, _) => {
                if self.mode != InteractionMode::Pinching {
                    self.begin_pinch(touches);
                    return;
                }
                let current = pinch_distance(touches[0], touches[1]);
                let Some((cx, cy)) = centroid(&touches[..2]) else {
                    return;
                };
                if let Some(last) = self.touch_state.last_distance {
                    if last > 0.0 && current > 0.0 {
                        outcome.view_changed |= self.zoom_at(cx, cy, current / last, config);
                    }
                }
                self.touch_state.last_distance = Some(current);
                self.touch_state.last_centroid = Some((cx, cy));
            }
        }
    }

    fn key(
        &mut self,
        key: NavigationKey,
        navigation: NavigationContext,
        config: &InteractionConfig,
        outcome: &mut InteractionOutcome,
    ) {
        if navigation.point_count == 0 {
            self.focused_point_index = 0;
            return;
        }
        let last = navigation.point_count - 1;
        let current = self.focused_point_index.min(last);
        self.focused_point_index = match key {
            NavigationKey::ArrowLeft => current.saturating_sub(1),
            NavigationKey::ArrowRight => (current + 1).min(last),
            NavigationKey::Home => 0,
            NavigationKey::End => last,
            NavigationKey::Enter | NavigationKey::Space => current,
        };
        let focused = PointRef::new(navigation.dataset_index, self.focused_point_index);
        self.hovered_point = Some(focused);
        if matches!(key, NavigationKey::Enter | NavigationKey::Space) {
            self.activate(focused, config, outcome);
        }
    }
}
