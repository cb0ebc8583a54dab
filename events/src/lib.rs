//! Consensus event payloads and the bus a host node publishes into.
//!
//! The host node owns block processing and emits three kinds of events the
//! notifier cares about: a wallet cast a vote, a wallet withdrew a vote,
//! and a delegate missed its block slot. Payloads carry the raw transaction
//! fields; account resolution happens downstream in the messenger.

pub mod bus;
pub mod event;

pub use bus::EventBus;
pub use event::{MissedBlock, VoteAsset, VoteTransaction};
