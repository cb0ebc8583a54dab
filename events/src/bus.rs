//! Fan-out event bus for consensus events.
//!
//! One broadcast channel per topic. The node publishes from its processing
//! threads; observers subscribe to the topics they care about. Publishing
//! with no subscribers is a no-op, and a slow subscriber only loses its own
//! backlog, never stalls the publisher.

use tokio::sync::broadcast;

use crate::event::{MissedBlock, VoteTransaction};

/// Event bus with one broadcast channel per consensus event topic.
pub struct EventBus {
    vote_tx: broadcast::Sender<VoteTransaction>,
    unvote_tx: broadcast::Sender<VoteTransaction>,
    missed_tx: broadcast::Sender<MissedBlock>,
}

impl EventBus {
    /// Create a bus with the given per-topic channel capacity.
    pub fn new(channel_capacity: usize) -> Self {
        let (vote_tx, _) = broadcast::channel(channel_capacity);
        let (unvote_tx, _) = broadcast::channel(channel_capacity);
        let (missed_tx, _) = broadcast::channel(channel_capacity);

        Self {
            vote_tx,
            unvote_tx,
            missed_tx,
        }
    }

    /// Publish a vote transaction.
    pub fn publish_vote(&self, tx: VoteTransaction) {
        let _ = self.vote_tx.send(tx);
    }

    /// Publish an unvote transaction.
    pub fn publish_unvote(&self, tx: VoteTransaction) {
        let _ = self.unvote_tx.send(tx);
    }

    /// Publish a missed block slot.
    pub fn publish_missed(&self, missed: MissedBlock) {
        let _ = self.missed_tx.send(missed);
    }

    pub fn subscribe_vote(&self) -> broadcast::Receiver<VoteTransaction> {
        self.vote_tx.subscribe()
    }

    pub fn subscribe_unvote(&self) -> broadcast::Receiver<VoteTransaction> {
        self.unvote_tx.subscribe()
    }

    pub fn subscribe_missed(&self) -> broadcast::Receiver<MissedBlock> {
        self.missed_tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
