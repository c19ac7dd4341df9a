use crate::error::{RelayError, Result as RelayResult};

use std::net::SocketAddr;

use log::info;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the global Prometheus recorder and its scrape listener.
/// Must run inside the tokio runtime.
pub fn install(addr: &str) -> RelayResult<SocketAddr> {
    let socket_addr: SocketAddr = addr.parse().map_err(|e| RelayError::Exporter {
        message: format!("Invalid metrics address {addr}: {e}"),
    })?;

    PrometheusBuilder::new()
        .with_http_listener(socket_addr)
        .install()
        .map_err(|e| RelayError::Exporter {
            message: format!("Failed to install Prometheus exporter on {socket_addr}: {e}"),
        })?;

    info!("Prometheus exporter listening on {socket_addr}");

    Ok(socket_addr)
}
