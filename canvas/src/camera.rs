#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, DEFAULT_MAX, DEFAULT_MIN, HORIZONTAL_INSET, MIN_CANVAS_PX, PADDING};

/// A point in either world (meters, Y up) or canvas (pixels, Y down) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// World-space rectangle mapped onto the canvas.
///
/// Only constructible through [`Viewport::new`], which rejects non-finite or
/// zero-extent bounds, so every projection built from it has a non-zero
/// divisor on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { min_x: DEFAULT_MIN, max_x: DEFAULT_MAX, min_y: DEFAULT_MIN, max_y: DEFAULT_MAX }
    }
}

impl Viewport {
    /// Build a viewport, or `None` if any bound is non-finite or an axis has
    /// no positive extent.
    #[must_use]
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Option<Self> {
        let finite = [min_x, max_x, min_y, max_y].iter().all(|v| v.is_finite());
        let range_x = max_x - min_x;
        let range_y = max_y - min_y;
        if !finite || !(range_x > 0.0 && range_x.is_finite()) || !(range_y > 0.0 && range_y.is_finite()) {
            return None;
        }
        Some(Self { min_x, max_x, min_y, max_y })
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    #[must_use]
    pub fn range_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn range_y(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Canvas pixel geometry. Both edges are at least [`MIN_CANVAS_PX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    width: u32,
    height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(MIN_CANVAS_PX, CANVAS_HEIGHT)
    }
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width: width.max(MIN_CANVAS_PX), height: height.max(MIN_CANVAS_PX) }
    }

    /// Geometry for a host container of the given CSS width: fixed height,
    /// width reduced by the horizontal inset.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn for_container(container_width: f64) -> Self {
        let width = (container_width - HORIZONTAL_INSET).floor();
        let width = if width.is_finite() && width > 0.0 { width.min(f64::from(u32::MAX)) as u32 } else { 0 };
        Self::new(width, CANVAS_HEIGHT)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width of the drawing area between the left and right padding.
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        f64::from(self.width) - PADDING * 2.0
    }

    /// Height of the drawing area between the top and bottom padding.
    #[must_use]
    pub fn inner_height(&self) -> f64 {
        f64::from(self.height) - PADDING * 2.0
    }
}

/// Linear world ↔ canvas mapping for one viewport and canvas size.
///
/// Y is flipped: world Y grows upward, canvas Y grows downward, and world
/// `min_y` lands on the row `height - PADDING`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub viewport: Viewport,
    pub canvas: CanvasSize,
}

impl Projection {
    #[must_use]
    pub fn new(viewport: Viewport, canvas: CanvasSize) -> Self {
        Self { viewport, canvas }
    }

    /// Convert a world-space point to canvas pixels.
    #[must_use]
    pub fn world_to_canvas(&self, world: Point) -> Point {
        let vp = &self.viewport;
        Point {
            x: PADDING + (world.x - vp.min_x) / vp.range_x() * self.canvas.inner_width(),
            y: f64::from(self.canvas.height)
                - PADDING
                - (world.y - vp.min_y) / vp.range_y() * self.canvas.inner_height(),
        }
    }

    /// Convert canvas pixels back to a world-space point.
    #[must_use]
    pub fn canvas_to_world(&self, canvas: Point) -> Point {
        let vp = &self.viewport;
        Point {
            x: vp.min_x + (canvas.x - PADDING) / self.canvas.inner_width() * vp.range_x(),
            y: vp.min_y + (f64::from(self.canvas.height) - PADDING - canvas.y) / self.canvas.inner_height() * vp.range_y(),
        }
    }

    /// Scale a world distance to pixels using the X-axis scale only.
    ///
    /// When the X and Y world ranges differ in aspect, a world circle drawn
    /// with this radius does not match the Y scale. Range circles keep this
    /// anisotropy on purpose.
    #[must_use]
    pub fn distance_to_pixels(&self, distance: f64) -> f64 {
        distance / self.viewport.range_x() * self.canvas.inner_width()
    }
}
