//! Viewer — applies poll results to the view and publishes each new frame.
//!
//! A failed fetch leaves the held state and the published file untouched. A
//! stale delivery (older than one already applied) is dropped without a
//! redraw. Every applied snapshot rewrites the output file atomically.

use std::path::{Path, PathBuf};

use canvas::engine::{Engine, UpdateOutcome};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::poller::Delivery;
use crate::svg::{self, SvgError, SvgSurface};

pub struct Viewer {
    engine: Engine<SvgSurface>,
    output: PathBuf,
}

impl Viewer {
    /// Create a viewer sized for `container_width` that publishes to `output`.
    ///
    /// # Errors
    ///
    /// Returns [`SvgError::Fmt`] if the initial empty frame cannot be drawn.
    pub fn new(container_width: f64, output: PathBuf) -> Result<Self, SvgError> {
        let engine = Engine::new(SvgSurface::new(), container_width)?;
        Ok(Self { engine, output })
    }

    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Write the current frame to the output file.
    ///
    /// # Errors
    ///
    /// Returns [`SvgError`] if serialization or the file write fails.
    pub async fn publish(&self) -> Result<(), SvgError> {
        let doc = self.engine.surface().document()?;
        svg::write_atomic(&self.output, &doc).await
    }

    /// Apply one poll result. Returns `None` when the fetch itself failed.
    ///
    /// # Errors
    ///
    /// Returns [`SvgError`] if redrawing or publishing an applied frame fails.
    pub async fn handle(&mut self, delivery: Delivery) -> Result<Option<UpdateOutcome>, SvgError> {
        let Delivery { seq, result } = delivery;
        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(seq, error = %e, "snapshot fetch failed; keeping last frame");
                return Ok(None);
            }
        };

        let outcome = self.engine.apply(seq, snapshot)?;
        match outcome {
            UpdateOutcome::Applied => {
                self.publish().await?;
                let core = &self.engine.core;
                info!(
                    seq,
                    scanners = core.scanners.len(),
                    target = core.target.is_some(),
                    output = %self.output.display(),
                    "frame published"
                );
            }
            UpdateOutcome::Stale => {
                debug!(seq, last = ?self.engine.core.last_seq(), "stale snapshot discarded");
            }
        }
        Ok(Some(outcome))
    }

    /// Consume deliveries until every sender is gone. Publish failures are
    /// logged and the loop carries on with the next delivery.
    pub async fn run(mut self, mut rx: mpsc::Receiver<Delivery>) {
        while let Some(delivery) = rx.recv().await {
            let seq = delivery.seq;
            if let Err(e) = self.handle(delivery).await {
                error!(seq, error = %e, "failed to publish frame");
            }
        }
        info!("viewer stopped");
    }
}

#[cfg(test)]
#[path = "viewer_test.rs"]
mod tests;
