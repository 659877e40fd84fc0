use mh_server::{Cli, RouterOptions, ServerState, build_router, logger};
use mh_ws::{AppState, ConnectionConfig, Hub, HubConfig, Metrics, ShutdownCoordinator};

use std::error::Error;
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env first so MH_* values in it take part in config loading
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load, override and validate configuration
    let mut config = mh_config::Config::load()?;
    cli.apply(&mut config);
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = mh_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting mh-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics_handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Prometheus recorder not installed, /metrics disabled: {e}");
            None
        }
    };

    let metrics = Metrics::new();

    let hub = Hub::new(
        &config.cors.origin,
        HubConfig {
            command_buffer_size: config.websocket.command_buffer_size,
        },
        metrics.clone(),
    );

    let connection_config = ConnectionConfig {
        send_buffer_size: config.websocket.send_buffer_size,
        heartbeat_interval: Duration::from_secs(config.websocket.heartbeat_interval_secs),
        heartbeat_timeout: Duration::from_secs(config.websocket.heartbeat_timeout_secs),
        write_timeout: Duration::from_secs(config.websocket.write_timeout_secs),
        max_message_size: config.websocket.max_message_size,
    };

    let state = ServerState::new(
        AppState::new(hub.clone(), connection_config, metrics),
        metrics_handle,
    );
    let app = build_router(state, &RouterOptions::from_config(&config));

    let listener = TcpListener::bind(config.bind_addr()).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!(
        "Server listening on {}, subscribers connect to {}/api/v2/websocket",
        actual_addr,
        config.ui.route_prefix()
    );

    let shutdown = ShutdownCoordinator::new();

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

    info!("Server ready to accept connections");
    let mut guard = shutdown.subscribe_guard();
    let hub_for_shutdown = hub.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            guard.wait().await;
            // Closing subscriber queues makes every write loop close its socket
            hub_for_shutdown.shutdown().await;
        })
        .await?;

    hub.shutdown().await;
    info!("Graceful shutdown complete");

    Ok(())
}
