use crate::SubscriberId;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Receive side of one subscriber's queue, handed out by `Broadcaster::subscribe`.
///
/// Dropping it does not unsubscribe; the owner still calls
/// `Broadcaster::unsubscribe(id)` when its stream ends.
#[derive(Debug)]
pub struct Subscription<M> {
    id: SubscriberId,
    receiver: mpsc::Receiver<Arc<M>>,
}

impl<M> Subscription<M> {
    pub(crate) fn new(id: SubscriberId, receiver: mpsc::Receiver<Arc<M>>) -> Self {
        Self { id, receiver }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next message. `None` once the broadcaster side is gone.
    pub async fn recv(&mut self) -> Option<Arc<M>> {
        self.receiver.recv().await
    }

    /// Take a queued message without waiting
    pub fn try_recv(&mut self) -> Option<Arc<M>> {
        match self.receiver.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Messages currently waiting in the queue
    pub fn queued(&self) -> usize {
        self.receiver.len()
    }

    /// Fixed capacity the queue was created with
    pub fn capacity(&self) -> usize {
        self.receiver.max_capacity()
    }
}
