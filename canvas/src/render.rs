//! Rendering: draws the full scene onto a [`Surface`].
//!
//! Layers are drawn bottom first and the order is fixed: background, grid,
//! range circles, scanner markers, target. Range circles are all drawn before
//! any scanner marker so a marker is never covered by another scanner's
//! circle stroke.
//!
//! Iteration follows the snapshot's scanner order and all labels use fixed
//! formatting, so identical inputs produce an identical op sequence.
//! Entities with non-finite geometry are skipped; they never abort the frame.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{Point, Projection, Viewport};
use crate::consts::{
    COLOR_BACKGROUND, COLOR_GRID, COLOR_GRID_TEXT, COLOR_SCANNER, COLOR_SCANNER_RANGE, COLOR_TARGET,
    COLOR_TARGET_GLOW, COLOR_TEXT, GRID_DIVISIONS, GRID_LINE_WIDTH_PX, MAX_GRID_LINES, PADDING,
    RANGE_LINE_WIDTH_PX, RSSI_LABEL_OFFSET_PX, SCANNER_LABEL_OFFSET_PX, SCANNER_RADIUS_PX,
    TARGET_ARM_PX, TARGET_GLOW_RADIUS_PX, TARGET_LABEL_OFFSET_PX, TARGET_LINE_WIDTH_PX,
};
use crate::doc::Scanner;
use crate::surface::{Align, Font, Stroke, Surface, TextStyle};

/// Label drawn above the target marker.
pub const TARGET_LABEL: &str = "TARGET";

/// Grid label offset from the vertical line's x position.
const GRID_X_LABEL_DX: f64 = -10.0;
/// Grid label offset below the bottom padding edge.
const GRID_X_LABEL_DY: f64 = 15.0;
/// Left edge of the horizontal grid labels.
const GRID_Y_LABEL_X: f64 = 5.0;
/// Baseline offset of the horizontal grid labels.
const GRID_Y_LABEL_DY: f64 = 4.0;

const GRID_STROKE: Stroke = Stroke { color: COLOR_GRID, width: GRID_LINE_WIDTH_PX };
const RANGE_STROKE: Stroke = Stroke { color: COLOR_SCANNER_RANGE, width: RANGE_LINE_WIDTH_PX };
const TARGET_STROKE: Stroke = Stroke { color: COLOR_TARGET, width: TARGET_LINE_WIDTH_PX };

const GRID_TEXT: TextStyle = TextStyle { font: Font::Small, align: Align::Left, color: COLOR_GRID_TEXT };
const SCANNER_TEXT: TextStyle = TextStyle { font: Font::Label, align: Align::Center, color: COLOR_TEXT };
const RSSI_TEXT: TextStyle = TextStyle { font: Font::Small, align: Align::Center, color: COLOR_GRID_TEXT };
const TARGET_TEXT: TextStyle = TextStyle { font: Font::Bold, align: Align::Center, color: COLOR_TARGET };

/// Draw the full scene.
///
/// # Errors
///
/// Returns the surface's error if a draw call fails. Malformed entities are
/// skipped, not reported.
pub fn draw<S: Surface>(
    surface: &mut S,
    projection: &Projection,
    scanners: &[Scanner],
    target: Option<Point>,
) -> Result<(), S::Error> {
    // Layer 1: background.
    surface.clear(COLOR_BACKGROUND)?;

    // Layer 2: reference grid.
    draw_grid(surface, projection)?;

    // Layer 3: range circles, strictly beneath every marker.
    for scanner in scanners {
        draw_range_circle(surface, projection, scanner)?;
    }

    // Layer 4: scanner markers and labels.
    for scanner in scanners {
        draw_scanner(surface, projection, scanner)?;
    }

    // Layer 5: target.
    if let Some(position) = target.filter(|p| p.is_finite()) {
        draw_target(surface, projection, position)?;
    }

    Ok(())
}

// =============================================================
// Grid
// =============================================================

/// Largest power of ten that fits about five times into the larger world
/// range.
#[must_use]
pub fn grid_step(viewport: &Viewport) -> f64 {
    let span = viewport.range_x().max(viewport.range_y());
    10f64.powf((span / GRID_DIVISIONS).log10().floor())
}

/// Multiples of `step` within `[lo, hi]`, ascending, at most
/// [`MAX_GRID_LINES`] of them.
///
/// Each value is computed as `k * step` rather than by repeated addition so
/// the labels do not drift.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn grid_lines(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite()) {
        return Vec::new();
    }
    let first = (lo / step).ceil();
    let last = (hi / step).floor();
    if !first.is_finite() || !last.is_finite() || last < first {
        return Vec::new();
    }
    let count = ((last - first) as usize).saturating_add(1).min(MAX_GRID_LINES);
    (0..count).map(|i| (first + i as f64) * step).collect()
}

/// Grid label text: one decimal place, never `-0.0`.
#[must_use]
pub fn format_coord(value: f64) -> String {
    // -0.0 + 0.0 is +0.0
    let value = value + 0.0;
    format!("{value:.1}")
}

fn draw_grid<S: Surface>(surface: &mut S, projection: &Projection) -> Result<(), S::Error> {
    let vp = &projection.viewport;
    let width = f64::from(projection.canvas.width());
    let height = f64::from(projection.canvas.height());
    let step = grid_step(vp);

    for x in grid_lines(vp.min_x(), vp.max_x(), step) {
        let p = projection.world_to_canvas(Point::new(x, 0.0));
        surface.line(Point::new(p.x, PADDING), Point::new(p.x, height - PADDING), GRID_STROKE)?;
        let at = Point::new(p.x + GRID_X_LABEL_DX, height - PADDING + GRID_X_LABEL_DY);
        surface.text(&format_coord(x), at, GRID_TEXT)?;
    }

    for y in grid_lines(vp.min_y(), vp.max_y(), step) {
        let p = projection.world_to_canvas(Point::new(0.0, y));
        surface.line(Point::new(PADDING, p.y), Point::new(width - PADDING, p.y), GRID_STROKE)?;
        let at = Point::new(GRID_Y_LABEL_X, p.y + GRID_Y_LABEL_DY);
        surface.text(&format_coord(y), at, GRID_TEXT)?;
    }

    Ok(())
}

// =============================================================
// Scanners
// =============================================================

fn draw_range_circle<S: Surface>(surface: &mut S, projection: &Projection, scanner: &Scanner) -> Result<(), S::Error> {
    let Some(distance) = scanner.estimated_distance else {
        return Ok(());
    };
    if !scanner.position.is_finite() || !distance.is_finite() || distance < 0.0 {
        return Ok(());
    }
    let center = projection.world_to_canvas(scanner.position);
    surface.stroke_circle(center, projection.distance_to_pixels(distance), RANGE_STROKE)
}

fn draw_scanner<S: Surface>(surface: &mut S, projection: &Projection, scanner: &Scanner) -> Result<(), S::Error> {
    if !scanner.position.is_finite() {
        return Ok(());
    }
    let pos = projection.world_to_canvas(scanner.position);

    surface.fill_circle(pos, SCANNER_RADIUS_PX, COLOR_SCANNER)?;
    surface.text(&scanner.id, Point::new(pos.x, pos.y - SCANNER_LABEL_OFFSET_PX), SCANNER_TEXT)?;

    if let Some(rssi) = scanner.last_rssi.filter(|r| r.is_finite()) {
        surface.text(&format!("{rssi} dBm"), Point::new(pos.x, pos.y + RSSI_LABEL_OFFSET_PX), RSSI_TEXT)?;
    }

    Ok(())
}

// =============================================================
// Target
// =============================================================

fn draw_target<S: Surface>(surface: &mut S, projection: &Projection, position: Point) -> Result<(), S::Error> {
    let pos = projection.world_to_canvas(position);

    surface.fill_circle(pos, TARGET_GLOW_RADIUS_PX, COLOR_TARGET_GLOW)?;

    let arm = TARGET_ARM_PX;
    surface.line(Point::new(pos.x - arm, pos.y - arm), Point::new(pos.x + arm, pos.y + arm), TARGET_STROKE)?;
    surface.line(Point::new(pos.x + arm, pos.y - arm), Point::new(pos.x - arm, pos.y + arm), TARGET_STROKE)?;

    surface.text(TARGET_LABEL, Point::new(pos.x, pos.y - TARGET_LABEL_OFFSET_PX), TARGET_TEXT)
}
