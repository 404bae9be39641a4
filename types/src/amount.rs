//! Monetary amounts and basis-point shares.
//!
//! Amounts are fixed-point integers (u128) in the smallest unit of the
//! settlement currency; no floating point anywhere in the engine. Shares
//! are integer basis points, where 10000 = 100%.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A monetary amount in raw units (u128).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An integer basis-point share: 10000 = 100%.
///
/// A claim's share must lie in [1, 10000]. The sum of shares across a
/// project's claims is NOT capped here; over-funded projects can
/// over-allocate (a known property of the distribution arithmetic).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// The number of basis points in a whole: 100%.
    pub const SCALE: u16 = 10_000;

    /// The largest share a single claim may hold (100%).
    pub const MAX: Self = Self(Self::SCALE);

    pub const ZERO: Self = Self(0);

    pub fn new(bp: u16) -> Self {
        Self(bp)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whether this value is a valid per-claim share: in [1, 10000].
    pub fn is_valid_share(&self) -> bool {
        self.0 >= 1 && self.0 <= Self::SCALE
    }

    /// Compute a share of `funding_target` contributed by `amount`, floored:
    /// `floor(amount * 10000 / funding_target)`.
    ///
    /// Returns `None` if the target is zero or the result exceeds `u16`.
    pub fn from_contribution(amount: Amount, funding_target: Amount) -> Option<Self> {
        if funding_target.is_zero() {
            return None;
        }
        let bp = amount
            .raw()
            .checked_mul(Self::SCALE as u128)?
            .checked_div(funding_target.raw())?;
        u16::try_from(bp).ok().map(Self)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bp", self.0)
    }
}
