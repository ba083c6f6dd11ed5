mod config;
mod poller;
mod source;
mod svg;
mod viewer;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;

use crate::config::{Cli, ViewerConfig};
use crate::source::HttpSource;
use crate::viewer::Viewer;

/// Deliveries buffered between the poller and the viewer.
const DELIVERY_QUEUE_CAPACITY: usize = 16;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match ViewerConfig::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let source = match HttpSource::new(&config.base_url, config.timeouts, config.token.clone()) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(error = %e, "snapshot source init failed");
            return ExitCode::FAILURE;
        }
    };

    let viewer = match Viewer::new(config.container_width, config.output.clone()) {
        Ok(viewer) => viewer,
        Err(e) => {
            tracing::error!(error = %e, "view init failed");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = viewer.publish().await {
        tracing::error!(error = %e, "initial frame write failed");
        return ExitCode::FAILURE;
    }

    tracing::info!(
        url = source.url(),
        auth = source.has_token(),
        width = config.container_width,
        output = %viewer.output().display(),
        "trilateration view running"
    );

    let (tx, rx) = mpsc::channel(DELIVERY_QUEUE_CAPACITY);
    let poller = poller::spawn_poller(Arc::new(source), config.interval, tx);
    let view = tokio::spawn(viewer.run(rx));

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");

    // Aborting the poller drops every sender, which ends the view loop.
    poller.abort();
    if let Err(e) = view.await {
        tracing::error!(error = %e, "view task failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
