use log::debug;

use crate::camera::{CanvasSize, Point, Projection, Viewport};
use crate::doc::{Scanner, Snapshot};
use crate::framing;
use crate::render;
use crate::surface::Surface;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Result of offering a sequenced snapshot to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The snapshot replaced the held state.
    Applied,
    /// The snapshot was older than one already applied and was discarded.
    Stale,
}

/// Core view state — everything that doesn't depend on a drawing surface.
///
/// Holds the current entities, the viewport framed around them and the
/// canvas pixel geometry. Entities are replaced wholesale on every update.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub scanners: Vec<Scanner>,
    pub target: Option<Point>,
    pub viewport: Viewport,
    pub canvas: CanvasSize,
    last_seq: Option<u64>,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the held entities with the snapshot's and reframe.
    pub fn update(&mut self, snapshot: Snapshot) {
        self.target = snapshot.target_position();
        self.scanners = snapshot.scanners;
        self.viewport = framing::frame(&self.scanners, self.target);
        debug!(
            "view updated: scanners={} target={} viewport=[{}, {}]x[{}, {}]",
            self.scanners.len(),
            self.target.is_some(),
            self.viewport.min_x(),
            self.viewport.max_x(),
            self.viewport.min_y(),
            self.viewport.max_y(),
        );
    }

    /// Apply a snapshot tagged with a monotonic sequence number.
    ///
    /// Snapshots whose sequence is not newer than the last applied one are
    /// discarded, so a slow response can't roll the view back.
    pub fn apply(&mut self, seq: u64, snapshot: Snapshot) -> UpdateOutcome {
        if self.last_seq.is_some_and(|last| seq <= last) {
            debug!("discarding stale snapshot seq={seq} last={:?}", self.last_seq);
            return UpdateOutcome::Stale;
        }
        self.last_seq = Some(seq);
        self.update(snapshot);
        UpdateOutcome::Applied
    }

    /// Recompute pixel geometry for a host container width. World-space
    /// state is untouched.
    pub fn resize(&mut self, container_width: f64) {
        self.canvas = CanvasSize::for_container(container_width);
    }

    // --- Queries ---

    /// True when there is at least one scanner or a target.
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.scanners.is_empty() || self.target.is_some()
    }

    /// Sequence number of the last applied snapshot, if any.
    #[must_use]
    pub fn last_seq(&self) -> Option<u64> {
        self.last_seq
    }

    /// The current world ↔ canvas mapping.
    #[must_use]
    pub fn projection(&self) -> Projection {
        Projection::new(self.viewport, self.canvas)
    }
}

/// The full view. Wraps `EngineCore` and owns the drawing surface.
///
/// Every state change is followed by a full redraw.
pub struct Engine<S: Surface> {
    surface: S,
    pub core: EngineCore,
}

impl<S: Surface> Engine<S> {
    /// Create a view bound to `surface`, sized for `container_width`, and
    /// draw the empty scene.
    ///
    /// # Errors
    ///
    /// Returns the surface error if sizing or the first draw fails.
    pub fn new(surface: S, container_width: f64) -> Result<Self, S::Error> {
        let mut engine = Self { surface, core: EngineCore::new() };
        engine.on_resize(container_width)?;
        Ok(engine)
    }

    /// Replace the held state with `snapshot` and redraw.
    ///
    /// # Errors
    ///
    /// Returns the surface error if drawing fails.
    pub fn update(&mut self, snapshot: Snapshot) -> Result<(), S::Error> {
        self.core.update(snapshot);
        self.render()
    }

    /// Apply a sequenced snapshot; redraws only when it was applied.
    ///
    /// # Errors
    ///
    /// Returns the surface error if drawing fails.
    pub fn apply(&mut self, seq: u64, snapshot: Snapshot) -> Result<UpdateOutcome, S::Error> {
        let outcome = self.core.apply(seq, snapshot);
        if outcome == UpdateOutcome::Applied {
            self.render()?;
        }
        Ok(outcome)
    }

    /// Resize the surface for a new container width and redraw the held
    /// state.
    ///
    /// # Errors
    ///
    /// Returns the surface error if resizing or drawing fails.
    pub fn on_resize(&mut self, container_width: f64) -> Result<(), S::Error> {
        self.core.resize(container_width);
        self.surface.resize(self.core.canvas)?;
        self.render()
    }

    /// Draw the held state.
    ///
    /// # Errors
    ///
    /// Returns the surface error if drawing fails.
    pub fn render(&mut self) -> Result<(), S::Error> {
        let projection = self.core.projection();
        render::draw(&mut self.surface, &projection, &self.core.scanners, self.core.target)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}
