pub mod broadcaster;
pub mod error;
pub mod id_allocator;
pub mod metrics;
pub mod publish_outcome;
pub mod subscriber_id;
pub mod subscription;

pub use broadcaster::Broadcaster;
pub use error::{FanoutError, Result};
pub use id_allocator::IdAllocator;
pub use metrics::Metrics;
pub use publish_outcome::PublishOutcome;
pub use subscriber_id::SubscriberId;
pub use subscription::Subscription;

pub use fanout_config::BroadcastConfig;

#[cfg(test)]
mod tests;
