use crate::PublishOutcome;

use metrics::{counter, gauge};

/// Metrics sink for the broadcaster.
///
/// Built on the `metrics` facade: without an installed recorder every call
/// is a no-op.
#[derive(Debug, Clone)]
pub struct Metrics {
    prefix: String,
}

impl Metrics {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Record a new subscription and the resulting subscriber count
    pub fn subscription_opened(&self, active: usize) {
        counter!(format!("{}.subscriptions.opened", self.prefix)).increment(1);
        self.subscribers_active(active);
    }

    /// Record a removed subscription and the resulting subscriber count
    pub fn subscription_closed(&self, active: usize) {
        counter!(format!("{}.subscriptions.closed", self.prefix)).increment(1);
        self.subscribers_active(active);
    }

    /// Current number of registered subscribers
    pub fn subscribers_active(&self, active: usize) {
        gauge!(format!("{}.subscribers.active", self.prefix)).set(active as f64);
    }

    /// Record the result of one publish
    pub fn message_published(&self, outcome: &PublishOutcome) {
        counter!(format!("{}.messages.published", self.prefix)).increment(1);
        counter!(format!("{}.messages.delivered", self.prefix)).increment(outcome.delivered as u64);
        counter!(format!("{}.messages.dropped", self.prefix)).increment(outcome.dropped as u64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(fanout_config::DEFAULT_METRICS_PREFIX)
    }
}
