//! Event payloads emitted by the host node.

use herald_types::{PublicKey, TxId};
use serde::{Deserialize, Serialize};

/// The asset of a vote or unvote transaction.
///
/// Each entry is a delegate public key prefixed with one character: `+`
/// casts a vote, `-` withdraws one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VoteAsset {
    #[serde(default)]
    pub votes: Vec<String>,
}

impl VoteAsset {
    /// The delegate public key of the first vote entry, prefix stripped.
    ///
    /// Returns `None` when the asset has no entries or the stripped
    /// remainder is not a well-formed public key. Malformed assets drop
    /// the event; they never panic.
    pub fn first_vote_target(&self) -> Option<PublicKey> {
        let entry = self.votes.first()?;
        let prefix = entry.chars().next()?;
        if prefix != '+' && prefix != '-' {
            return None;
        }
        let key = PublicKey::new(entry.get(1..)?);
        key.is_valid().then_some(key)
    }
}

/// A vote or unvote transaction as emitted by the node.
///
/// Whether it casts or withdraws is carried by the bus topic it arrives
/// on, matching how the node raises separate vote and unvote events.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteTransaction {
    pub id: TxId,
    pub sender_public_key: PublicKey,
    #[serde(default)]
    pub asset: VoteAsset,
}

/// A delegate failed to produce its assigned block.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MissedBlock {
    pub username: String,
}
