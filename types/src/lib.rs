//! Fundamental types for the herald notifier.
//!
//! This crate defines the domain types shared by every other crate in the
//! workspace: token amounts, public keys, wallet addresses and transaction
//! ids.

pub mod address;
pub mod amount;
pub mod hash;
pub mod keys;

pub use address::WalletAddress;
pub use amount::ArkAmount;
pub use hash::TxId;
pub use keys::PublicKey;
