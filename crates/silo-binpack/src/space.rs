//! Strongly typed size and bin identity scalars.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size unit shared by bin capacity, item cost, and remaining space.
///
/// Zero is a valid measurement: a full bin has `Space::ZERO` remaining.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Space(u64);

impl Space {
    /// Zero space.
    pub const ZERO: Space = Space(0);

    /// Create a new space value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Return the raw value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Subtract, clamping at zero.
    pub const fn saturating_sub(self, other: Space) -> Space {
        Space(self.0.saturating_sub(other.0))
    }
}

impl From<u64> for Space {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Numeric identity of a bin.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BinId(u64);

impl BinId {
    /// The distinguished zero-value bin identity.
    ///
    /// Mechanisms may hand it out before any bin has been opened; it carries
    /// no capacity semantics by itself.
    pub const ZERO: BinId = BinId(0);

    /// Create a new bin identity.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Return the raw identity.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for BinId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Implemented by mechanism bin handle types to expose bin identity.
pub trait BinHandle {
    /// Numeric identity of this bin.
    fn id(&self) -> BinId;
}
