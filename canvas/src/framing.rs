//! Viewport framing: fit the world rectangle to the current entities.
//!
//! The viewport is recomputed from scratch on every update. There is no
//! smoothing between frames, so a sharp change in the entity extent makes the
//! view jump.

#[cfg(test)]
#[path = "framing_test.rs"]
mod framing_test;

use crate::camera::{Point, Viewport};
use crate::consts::{MARGIN_RATIO, MIN_MARGIN};
use crate::doc::Scanner;

/// Axis-aligned bounding box accumulator.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bounds {
    fn around(p: Point) -> Self {
        Self { min_x: p.x, max_x: p.x, min_y: p.y, max_y: p.y }
    }

    fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }
}

/// Margin added to each side of an axis with the given extent.
#[must_use]
pub fn margin(extent: f64) -> f64 {
    MIN_MARGIN.max(extent * MARGIN_RATIO)
}

/// Compute the viewport for a scanner list and optional target position.
///
/// With no usable entity this is [`Viewport::default`]. Otherwise it is the
/// bounding box of every finite position, grown on each side by
/// [`margin`]. Non-finite positions are ignored; if the grown box still is
/// not a valid viewport the default is returned.
#[must_use]
pub fn frame(scanners: &[Scanner], target: Option<Point>) -> Viewport {
    let positions = scanners
        .iter()
        .map(|s| s.position)
        .chain(target)
        .filter(|p| p.is_finite());

    let mut bounds: Option<Bounds> = None;
    for p in positions {
        match bounds.as_mut() {
            Some(b) => b.include(p),
            None => bounds = Some(Bounds::around(p)),
        }
    }

    let Some(b) = bounds else {
        return Viewport::default();
    };

    let margin_x = margin(b.max_x - b.min_x);
    let margin_y = margin(b.max_y - b.min_y);

    Viewport::new(b.min_x - margin_x, b.max_x + margin_x, b.min_y - margin_y, b.max_y + margin_y)
        .unwrap_or_default()
}
