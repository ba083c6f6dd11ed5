//! Shared numeric constants and palette for the canvas crate.

// ── Layout ──────────────────────────────────────────────────────

/// Inset in pixels reserved on every canvas edge for axis labels.
pub const PADDING: f64 = 40.0;

/// Fixed canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 500;

/// Horizontal inset subtracted from the host container width.
pub const HORIZONTAL_INSET: f64 = 32.0;

/// Smallest canvas edge (`2 * PADDING + 1`) that still leaves a one-pixel
/// inner drawing area.
pub const MIN_CANVAS_PX: u32 = 81;

// ── Framing ─────────────────────────────────────────────────────

/// Default world bounds (meters) shown before any entity is known.
pub const DEFAULT_MIN: f64 = -2.0;
pub const DEFAULT_MAX: f64 = 15.0;

/// Minimum margin in world units added to each side of the bounding box.
pub const MIN_MARGIN: f64 = 2.0;

/// Margin as a fraction of the axis extent.
pub const MARGIN_RATIO: f64 = 0.2;

// ── Grid ────────────────────────────────────────────────────────

/// Target number of grid intervals across the larger world range.
pub const GRID_DIVISIONS: f64 = 5.0;

/// Upper bound on grid lines per axis.
pub const MAX_GRID_LINES: usize = 200;

// ── Markers (pixels) ────────────────────────────────────────────

pub const SCANNER_RADIUS_PX: f64 = 8.0;
pub const SCANNER_LABEL_OFFSET_PX: f64 = 15.0;
pub const RSSI_LABEL_OFFSET_PX: f64 = 20.0;
pub const RANGE_LINE_WIDTH_PX: f64 = 2.0;
pub const GRID_LINE_WIDTH_PX: f64 = 1.0;
pub const TARGET_GLOW_RADIUS_PX: f64 = 20.0;
pub const TARGET_ARM_PX: f64 = 12.0;
pub const TARGET_LINE_WIDTH_PX: f64 = 3.0;
pub const TARGET_LABEL_OFFSET_PX: f64 = 25.0;

// ── Palette ─────────────────────────────────────────────────────

pub const COLOR_BACKGROUND: &str = "#010409";
pub const COLOR_GRID: &str = "#21262d";
pub const COLOR_GRID_TEXT: &str = "#484f58";
pub const COLOR_SCANNER: &str = "#58a6ff";
pub const COLOR_SCANNER_RANGE: &str = "rgba(88, 166, 255, 0.15)";
pub const COLOR_TARGET: &str = "#f85149";
pub const COLOR_TARGET_GLOW: &str = "rgba(248, 81, 73, 0.3)";
pub const COLOR_TEXT: &str = "#c9d1d9";
