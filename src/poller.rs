//! Poller — periodic snapshot fetches on a fixed schedule.
//!
//! DESIGN
//! ======
//! A tick fires every interval whether or not the previous fetch has
//! answered, so requests can overlap and complete out of order. Each fetch is
//! stamped with a monotonic sequence number at issue time; the view uses it
//! to discard late answers (`EngineCore::apply`).
//!
//! Fetches run inside a `JoinSet` owned by the poller task. Aborting the
//! poller drops the set, which cancels anything still in flight, and the
//! poller exits on its own once the receiving side hangs up.

use std::sync::Arc;
use std::time::Duration;

use canvas::doc::Snapshot;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::source::{SnapshotSource, SourceError};

/// One fetch outcome, tagged with the sequence number it was issued under.
#[derive(Debug)]
pub struct Delivery {
    pub seq: u64,
    pub result: Result<Snapshot, SourceError>,
}

/// Spawn the polling task. The first fetch is issued immediately. Returns a
/// handle for shutdown.
pub fn spawn_poller(
    source: Arc<dyn SnapshotSource>,
    interval: Duration,
    tx: mpsc::Sender<Delivery>,
) -> JoinHandle<()> {
    let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
    info!(interval_ms, "snapshot poller configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight = JoinSet::new();
        let mut seq: u64 = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                () = tx.closed() => break,
            }

            // Reap finished fetches so the set only holds live ones.
            while in_flight.try_join_next().is_some() {}

            seq += 1;
            let source = Arc::clone(&source);
            let tx = tx.clone();
            in_flight.spawn(async move {
                let result = source.fetch().await;
                if tx.send(Delivery { seq, result }).await.is_err() {
                    debug!(seq, "view closed; dropping fetch result");
                }
            });
        }

        info!(issued = seq, "snapshot poller stopped");
    })
}

#[cfg(test)]
#[path = "poller_test.rs"]
mod tests;
