
use crate::{BroadcastConfig, Broadcaster, Metrics};

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use ::metrics::{
    Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
};

/// Test message: identity matters, content does not
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Event(pub u32);

pub(crate) fn broadcaster() -> Broadcaster<Event> {
    Broadcaster::new(BroadcastConfig::default(), Metrics::default())
}

/// Recorder that keeps the last value of every counter and gauge by name
#[derive(Default)]
pub(crate) struct CapturingRecorder {
    counters: Mutex<HashMap<String, Arc<AtomicU64>>>,
    gauges: Mutex<HashMap<String, Arc<AtomicU64>>>,
}

impl CapturingRecorder {
    pub(crate) fn counter(&self, name: &str) -> u64 {
        self.counters
            .lock()
            .unwrap()
            .get(name)
            .map(|value| value.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub(crate) fn gauge(&self, name: &str) -> Option<f64> {
        self.gauges
            .lock()
            .unwrap()
            .get(name)
            .map(|value| f64::from_bits(value.load(Ordering::SeqCst)))
    }

    /// Run `f` on a single-threaded runtime with this recorder installed
    pub(crate) fn run<F, T>(&self, f: F) -> T
    where
        F: Future<Output = T>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        ::metrics::with_local_recorder(self, || runtime.block_on(f))
    }
}

impl Recorder for CapturingRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {
    }

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        let mut counters = self.counters.lock().unwrap();
        let value = counters.entry(key.name().to_string()).or_default();
        Counter::from_arc(Arc::clone(value))
    }

    fn register_gauge(&self, key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        let mut gauges = self.gauges.lock().unwrap();
        let value = gauges.entry(key.name().to_string()).or_default();
        Gauge::from_arc(Arc::clone(value))
    }

    fn register_histogram(&self, _key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        Histogram::noop()
    }
}
