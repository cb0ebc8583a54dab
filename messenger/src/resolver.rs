//! Account lookup seam between the messenger and the host node.
//!
//! The host's wallet service resolves public keys to accounts; the
//! messenger only needs this one lookup. [`MemoryResolver`] is a
//! deterministic map-backed implementation for tests and embedders
//! without a live wallet service.

use herald_types::{ArkAmount, PublicKey, WalletAddress};
use std::collections::HashMap;
use thiserror::Error;

/// An account as reported by the host's wallet service.
#[derive(Clone, Debug)]
pub struct Account {
    pub address: WalletAddress,
    /// Registered delegate username; empty for plain wallets.
    pub username: String,
    pub balance: ArkAmount,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no account for public key {0}")]
    NotFound(PublicKey),
}

/// Resolves a public key to an account.
///
/// Implementations are expected to be fast, in-memory lookups; the
/// dispatcher calls them inline on its event-processing path.
pub trait AccountResolver: Send + Sync {
    fn resolve_by_public_key(&self, public_key: &PublicKey) -> Result<Account, ResolveError>;
}

/// An immutable, map-backed resolver.
///
/// Built once from known accounts, then shared; lookups never block.
#[derive(Default)]
pub struct MemoryResolver {
    accounts: HashMap<PublicKey, Account>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account, builder style.
    pub fn with_account(mut self, public_key: PublicKey, account: Account) -> Self {
        self.accounts.insert(public_key, account);
        self
    }
}

impl AccountResolver for MemoryResolver {
    fn resolve_by_public_key(&self, public_key: &PublicKey) -> Result<Account, ResolveError> {
        self.accounts
            .get(public_key)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(public_key.clone()))
    }
}
