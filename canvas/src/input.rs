//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `GestureState` is the active gesture being tracked between
//! pointer-down and pointer-up, carrying all context needed to compute
//! incremental deltas and emit final document mutations on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashSet;

use crate::camera::Point;
use crate::doc::EntityId;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Pan the canvas by dragging.
    Pan,
    /// Freehand drawing.
    Draw,
    /// Place a canvas header.
    Header,
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key, holding the name as reported by the browser
/// (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Ids of the currently selected entities.
    pub selection: HashSet<EntityId>,
}

/// The active gesture being tracked between pointer-down and pointer-up.
///
/// Each variant carries the context needed to compute deltas and emit final
/// actions on release.
#[derive(Debug, Clone)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// The user is panning the canvas.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is sweeping a marquee selection rectangle.
    Selecting {
        /// World-space corner where the drag started.
        anchor_world: Point,
        /// World-space position of the current pointer event.
        current_world: Point,
        /// Selection held at pointer-down; shift-marquee extends it.
        base: HashSet<EntityId>,
    },
    /// The user is moving a folder across the canvas.
    DraggingFolder {
        id: EntityId,
        /// World-space pointer position at the previous event.
        last_world: Point,
        /// Screen-space position of the initial pointer-down, for the click threshold.
        down_screen: Point,
        /// Folder origin at the start of the drag, used to revert on cancel.
        orig_x: f64,
        orig_y: f64,
        /// Stacking order before the bring-to-front at pointer-down, so a
        /// cancelled or click-only gesture leaves draw order untouched.
        orig_z: i64,
    },
    /// The user is moving a canvas header.
    DraggingHeader {
        id: EntityId,
        last_world: Point,
        down_screen: Point,
        orig_x: f64,
        orig_y: f64,
    },
    /// The user is drawing a freehand path.
    Drawing {
        /// Id of the provisional path being extended.
        id: EntityId,
    },
}

impl Default for GestureState {
    fn default() -> Self {
        Self::Idle
    }
}

impl GestureState {
    /// Whether any gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
