//! Public key type for wallet identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A compressed secp256k1 public key, hex encoded (33 bytes, 66 hex chars).
///
/// Construction is unchecked: keys arrive embedded in wire payloads, and a
/// malformed key must drop the surrounding event rather than panic. Use
/// [`PublicKey::is_valid`] to check the shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(String);

impl PublicKey {
    /// Hex length of a compressed secp256k1 public key.
    pub const HEX_LEN: usize = 66;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this key has the shape of a compressed secp256k1 key.
    pub fn is_valid(&self) -> bool {
        self.0.len() == Self::HEX_LEN && self.0.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PublicKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
