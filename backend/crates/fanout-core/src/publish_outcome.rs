/// Tally of a single publish across the subscribers registered at that moment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Queues that accepted the message
    pub delivered: usize,
    /// Queues that were full or whose receiver is gone
    pub dropped: usize,
}

impl PublishOutcome {
    /// Number of subscribers the publish saw
    pub fn attempted(&self) -> usize {
        self.delivered + self.dropped
    }
}
