//! Packing error types.

use crate::space::{BinId, Space};
use thiserror::Error;

/// Errors surfaced by a packing strategy.
///
/// Generic over the mechanism's error type so allocation and placement
/// failures propagate verbatim as sources, wrapped with enough context to
/// identify which step failed. Strategies never retry.
#[derive(Debug, Error)]
pub enum PackError<E>
where
    E: std::error::Error + 'static,
{
    /// The item's cost exceeds the mechanism's fixed bin capacity, so no bin
    /// from this mechanism can ever hold it. Leaves all bins untouched.
    #[error("item cost {item} exceeds bin capacity {capacity}")]
    ItemTooLarge {
        /// Cost of the rejected item.
        item: Space,
        /// Fixed capacity of the mechanism's bins.
        capacity: Space,
    },

    /// Opening a new bin failed.
    #[error("failed to open new bin")]
    Allocate {
        /// Underlying mechanism error.
        #[source]
        source: E,
    },

    /// Writing the item into its chosen bin failed.
    #[error("failed to place item into bin {bin}")]
    Place {
        /// Identity of the bin the placement targeted.
        bin: BinId,
        /// Underlying mechanism error.
        #[source]
        source: E,
    },
}

impl<E> PackError<E>
where
    E: std::error::Error + 'static,
{
    /// True when no bin from this mechanism can ever hold the item.
    ///
    /// Callers must either reject the item or resubmit it against a
    /// mechanism with larger bins.
    pub fn is_item_too_large(&self) -> bool {
        matches!(self, Self::ItemTooLarge { .. })
    }
}
