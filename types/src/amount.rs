//! Token amount type for ARK balances.
//!
//! Amounts are represented as fixed-point integers (u64 satoshi) to avoid
//! floating-point errors. 1 ARK = 100,000,000 satoshi.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ARK amount, stored as raw satoshi (u64) for precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArkAmount(u64);

impl ArkAmount {
    pub const ZERO: Self = Self(0);

    /// Number of satoshi in one whole ARK.
    pub const SATOSHI_PER_ARK: u64 = 100_000_000;

    pub fn from_satoshi(raw: u64) -> Self {
        Self(raw)
    }

    pub fn satoshi(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Render the amount in whole ARK with exactly two decimal digits.
    ///
    /// Rounds half up at the third decimal: `123456789` satoshi is
    /// `1.23456789` ARK and renders as `"1.23"`; `250000000` renders as
    /// `"2.50"`.
    pub fn to_ark_string(&self) -> String {
        // One cent of ARK is 10^6 satoshi; round to the nearest cent.
        // Widened to u128 so rounding cannot overflow near u64::MAX.
        const SATOSHI_PER_CENT: u128 = (ArkAmount::SATOSHI_PER_ARK / 100) as u128;
        let cents = (self.0 as u128 + SATOSHI_PER_CENT / 2) / SATOSHI_PER_CENT;
        format!("{}.{:02}", cents / 100, cents % 100)
    }
}

impl fmt::Display for ArkAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ark_string())
    }
}
