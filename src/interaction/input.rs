use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::primitives::distance;

/// One active touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    #[must_use]
    pub const fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

pub type TouchList = SmallVec<[TouchPoint; 2]>;

/// Mouse, touch and pen input unified into one variant.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse {
        x: f64,
        y: f64,
    },
    /// All contacts currently on the surface (for `Up`, the ones remaining).
    Touch(TouchList),
    Pen {
        x: f64,
        y: f64,
        pressure: f64,
        tilt_x: f64,
        tilt_y: f64,
    },
}

impl PointerInput {
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse { x, y }
    }

    #[must_use]
    pub fn touches(points: &[TouchPoint]) -> Self {
        Self::Touch(points.iter().copied().collect())
    }

    /// Primary position: pointer location or touch centroid.
    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::Mouse { x, y } | Self::Pen { x, y, .. } => Some((*x, *y)),
            Self::Touch(touches) => centroid(touches),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    #[must_use]
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// Data point addressed by dataset and point index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointRef {
    pub dataset_index: usize,
    pub point_index: usize,
}

impl PointRef {
    #[must_use]
    pub const fn new(dataset_index: usize, point_index: usize) -> Self {
        Self {
            dataset_index,
            point_index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationKey {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Enter,
    Space,
}

/// Raw event accepted by the interaction reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    Pointer {
        phase: PointerPhase,
        input: PointerInput,
        /// Data point under the pointer, resolved by the host's hit testing.
        target: Option<PointRef>,
        modifiers: Modifiers,
    },
    Wheel {
        delta_y: f64,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },
    Key(NavigationKey),
    Reset,
}

impl InteractionEvent {
    #[must_use]
    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self::Pointer {
            phase,
            input: PointerInput::mouse(x, y),
            target: None,
            modifiers: Modifiers::default(),
        }
    }

    #[must_use]
    pub fn mouse_on(phase: PointerPhase, x: f64, y: f64, target: PointRef) -> Self {
        Self::Pointer {
            phase,
            input: PointerInput::mouse(x, y),
            target: Some(target),
            modifiers: Modifiers::default(),
        }
    }

    #[must_use]
    pub fn touch(phase: PointerPhase, touches: &[TouchPoint]) -> Self {
        Self::Pointer {
            phase,
            input: PointerInput::touches(touches),
            target: None,
            modifiers: Modifiers::default(),
        }
    }

    #[must_use]
    pub fn wheel(delta_y: f64, x: f64, y: f64) -> Self {
        Self::Wheel {
            delta_y,
            x,
            y,
            modifiers: Modifiers::default(),
        }
    }
}

pub(crate) fn centroid(touches: &[TouchPoint]) -> Option<(f64, f64)> {
    if touches.is_empty() {
        return None;
    }
    let count = touches.len() as f64;
    let (sum_x, sum_y) = touches
        .iter()
        .fold((0.0, 0.0), |(sx, sy), touch| (sx + touch.x, sy + touch.y));
    Some((sum_x / count, sum_y / count))
}

pub(crate) fn pinch_distance(first: TouchPoint, second: TouchPoint) -> f64 {
    distance(first.x, first.y, second.x, second.y)
}
