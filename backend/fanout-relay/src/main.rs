use fanout_relay::{
    AppState, Heartbeat, HeartbeatSource, ShutdownCoordinator, build_router, logger,
    metrics_exporter,
};

use fanout_config::Config;
use fanout_core::{Broadcaster, Metrics};

use std::error::Error;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(log_dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(log_dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting fanout-relay v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    if let Some(metrics_addr) = config.relay.metrics_addr() {
        metrics_exporter::install(&metrics_addr)?;
    }

    let metrics = Metrics::new(config.broadcast.metrics_prefix.clone());
    let broadcaster: Broadcaster<Heartbeat> = Broadcaster::new(config.broadcast.clone(), metrics);
    let shutdown = ShutdownCoordinator::new();

    // Heartbeat publisher
    let source = HeartbeatSource::new(&config.relay);
    let source_task = tokio::spawn(source.run(broadcaster.clone(), shutdown.subscribe_guard()));

    let app = build_router(AppState::new(broadcaster, shutdown.clone()));

    let listener = TcpListener::bind(config.relay.bind_addr()).await?;
    info!("Relay listening on {}", listener.local_addr()?);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    let mut shutdown_guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_guard.wait().await;
        })
        .await?;

    source_task.await?;
    info!("Graceful shutdown complete");

    Ok(())
}
