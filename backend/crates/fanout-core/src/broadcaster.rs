use crate::{
    BroadcastConfig, FanoutError, IdAllocator, Metrics, PublishOutcome, Result as FanoutResult,
    SubscriberId, Subscription,
};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{RwLock, Semaphore, mpsc};

/// Fans messages from one publisher out to every registered subscriber.
///
/// Each subscriber owns a bounded queue. Publishing never waits on a queue:
/// a full queue loses that message for its subscriber only.
pub struct Broadcaster<M> {
    inner: Arc<RwLock<BroadcasterInner<M>>>,
    ids: IdAllocator,
    config: BroadcastConfig,
    metrics: Metrics,
}

struct BroadcasterInner<M> {
    /// Send side of every active subscriber's queue
    subscribers: HashMap<SubscriberId, mpsc::Sender<Arc<M>>>,
}

impl<M> Broadcaster<M> {
    pub fn new(config: BroadcastConfig, metrics: Metrics) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BroadcasterInner {
                subscribers: HashMap::new(),
            })),
            ids: IdAllocator::from(&config),
            config,
            metrics,
        }
    }

    /// Register a new subscriber with a queue of `capacity` messages.
    ///
    /// `capacity` must be in `1..=Semaphore::MAX_PERMITS`, the range a tokio
    /// bounded channel accepts.
    pub async fn subscribe(&self, capacity: usize) -> FanoutResult<Subscription<M>> {
        if capacity == 0 || capacity > Semaphore::MAX_PERMITS {
            return Err(FanoutError::InvalidCapacity {
                capacity,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let (sender, receiver) = mpsc::channel(capacity);

        let mut inner = self.inner.write().await;

        let id = self.ids.allocate(inner.subscribers.len(), |candidate| {
            inner.subscribers.contains_key(&candidate)
        })?;

        inner.subscribers.insert(id, sender);
        let active = inner.subscribers.len();
        self.metrics.subscription_opened(active);

        info!("Subscribed client {id} (capacity {capacity}, {active} total)");

        Ok(Subscription::new(id, receiver))
    }

    /// Register a new subscriber with the configured default capacity
    pub async fn subscribe_default(&self) -> FanoutResult<Subscription<M>> {
        self.subscribe(self.config.queue_capacity).await
    }

    /// Remove a subscriber. Unknown ids are ignored.
    ///
    /// Returns whether an entry was removed.
    pub async fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut inner = self.inner.write().await;

        let removed = inner.subscribers.remove(&id).is_some();
        let active = inner.subscribers.len();

        if removed {
            self.metrics.subscription_closed(active);
            debug!("Unsubscribed client {id} ({active} remaining)");
        } else {
            self.metrics.subscribers_active(active);
            debug!("Unsubscribe for unknown client {id} ignored");
        }

        removed
    }

    /// Offer `message` to every registered subscriber without waiting.
    ///
    /// Subscribers whose queue is full, or whose receiver is gone, miss this
    /// message; everyone else gets the same `Arc`.
    pub async fn publish(&self, message: Arc<M>) -> PublishOutcome {
        let inner = self.inner.read().await;

        let mut outcome = PublishOutcome::default();

        for (id, sender) in inner.subscribers.iter() {
            match sender.try_send(Arc::clone(&message)) {
                Ok(()) => {
                    outcome.delivered += 1;
                    debug!("Published message to client {id}");
                }
                Err(TrySendError::Full(_)) => {
                    outcome.dropped += 1;
                    debug!("Buffer overrun publishing to client {id}, message dropped");
                }
                Err(TrySendError::Closed(_)) => {
                    outcome.dropped += 1;
                    debug!("Receiver for client {id} is gone, message dropped");
                }
            }
        }

        drop(inner);
        self.metrics.message_published(&outcome);

        outcome
    }

    /// Number of registered subscribers
    pub async fn subscriber_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.subscribers.len()
    }

    /// Whether `id` is currently registered
    pub async fn is_subscribed(&self, id: SubscriberId) -> bool {
        let inner = self.inner.read().await;
        inner.subscribers.contains_key(&id)
    }

    pub fn config(&self) -> &BroadcastConfig {
        &self.config
    }
}

impl<M> Clone for Broadcaster<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            ids: self.ids.clone(),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
        }
    }
}
