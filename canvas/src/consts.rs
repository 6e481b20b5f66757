//! Shared numeric constants for the canvas crate.

// ── Camera ──────────────────────────────────────────────────────

/// Minimum zoom factor (zoomed far out).
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum zoom factor (zoomed far in).
pub const MAX_ZOOM: f64 = 4.0;

/// Multiplicative zoom step applied per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for drawing-path strokes.
pub const PATH_HIT_SLOP_PX: f64 = 6.0;

// ── Gestures ────────────────────────────────────────────────────

/// Screen-space distance below which a pointer-down/up pair counts as a click.
pub const CLICK_THRESHOLD_PX: f64 = 3.0;

/// Minimum world-space distance between consecutive sampled drawing points.
pub const DRAW_SAMPLE_DIST: f64 = 2.0;

/// Smoothing floor for slow drags; fast drags approach 1.0 (no damping).
pub const DRAG_SMOOTHING_MIN_ALPHA: f64 = 0.35;

/// World-space drag step at which smoothing fully tracks the pointer.
pub const DRAG_SMOOTHING_FULL_DIST: f64 = 24.0;

// ── Defaults ────────────────────────────────────────────────────

/// Default folder width in world units.
pub const FOLDER_DEFAULT_WIDTH: f64 = 220.0;

/// Default folder height in world units.
pub const FOLDER_DEFAULT_HEIGHT: f64 = 140.0;

/// Approximate rendered height of a canvas header, used for hit bounds.
pub const HEADER_HEIGHT: f64 = 32.0;

/// Approximate rendered width per header character, used for hit bounds.
pub const HEADER_CHAR_WIDTH: f64 = 12.0;

/// Default stroke width for new drawing paths, in world units.
pub const PATH_DEFAULT_WIDTH: f64 = 2.0;
