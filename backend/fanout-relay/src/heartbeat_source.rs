use crate::{Heartbeat, ShutdownGuard};

use std::sync::Arc;
use std::time::Duration;

use fanout_config::RelayConfig;
use fanout_core::Broadcaster;
use log::{debug, info};
use tokio::time::{MissedTickBehavior, interval};

/// Produces heartbeats on a fixed interval and publishes them
pub struct HeartbeatSource {
    node_name: String,
    interval: Duration,
    boot_timestamp: i64,
    counter: u64,
}

impl HeartbeatSource {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            node_name: config.node_name.clone(),
            interval: Duration::from_millis(config.heartbeat_interval_ms),
            boot_timestamp: chrono::Utc::now().timestamp_millis(),
            counter: 0,
        }
    }

    /// Build the next heartbeat in sequence
    pub fn next_heartbeat(&mut self) -> Heartbeat {
        let heartbeat = Heartbeat {
            node_name: self.node_name.clone(),
            counter: self.counter,
            timestamp: chrono::Utc::now().timestamp_millis(),
            boot_timestamp: self.boot_timestamp,
            version: env!("CARGO_PKG_VERSION").to_string(),
        };
        self.counter += 1;
        heartbeat
    }

    /// Publish a heartbeat every interval until shutdown
    pub async fn run(mut self, broadcaster: Broadcaster<Heartbeat>, mut shutdown: ShutdownGuard) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            "Heartbeat source '{}' started ({}ms interval)",
            self.node_name,
            self.interval.as_millis()
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let heartbeat = Arc::new(self.next_heartbeat());
                    let counter = heartbeat.counter;
                    let outcome = broadcaster.publish(heartbeat).await;
                    debug!(
                        "Heartbeat {counter} published ({} delivered, {} dropped)",
                        outcome.delivered, outcome.dropped
                    );
                }
                _ = shutdown.wait() => {
                    info!("Heartbeat source stopped after {} heartbeats", self.counter);
                    break;
                }
            }
        }
    }
}
