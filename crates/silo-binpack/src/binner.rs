//! Mechanism abstraction: concrete binning of items.

use crate::cancel::CancellationToken;
use crate::space::{BinHandle, Space};
use async_trait::async_trait;
use std::fmt::Debug;

/// Implemented by types which handle concrete binning of items.
///
/// A mechanism owns bin lifecycle and size accounting: it decides what a bin
/// physically is, how an item's cost is measured, and what placing an item
/// entails. Strategies only ever drive it through this interface.
///
/// Methods take `&self`; implementations that need shared mutable bookkeeping
/// should be cheap-to-clone handles over interior mutability. The core does
/// not add any synchronization of its own: current bin and remaining space
/// are shared mutable state with no atomicity guarantee across callers.
#[async_trait]
pub trait Binner: Send + Sync {
    /// Unit of data admitted into bins; only its cost is observable here.
    type Item: Send + Sync;

    /// Handle for a bin produced by this mechanism.
    type Bin: BinHandle + Clone + Eq + Debug + Send + Sync;

    /// Failure type surfaced by allocation and placement.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open a new, empty bin and make it this mechanism's current bin.
    ///
    /// Fails only on resource errors from the underlying mechanism.
    async fn allocate(&self) -> Result<Self::Bin, Self::Error>;

    /// Fixed capacity shared by every bin this mechanism produces.
    fn capacity(&self) -> Space;

    /// Finalize a bin.
    ///
    /// A closed bin never receives further items; placement into one is
    /// mechanism-undefined and strategies never attempt it.
    fn close(&self, bin: &Self::Bin);

    /// Deterministic cost of an item, independent of any candidate bin.
    fn item_cost(&self, item: &Self::Item) -> Space;

    /// Write `item` into `bin`.
    ///
    /// Safe only once the caller has verified sufficient remaining space.
    /// Failures propagate verbatim. The token is the caller's; honoring it
    /// during I/O is up to the implementation.
    async fn place(
        &self,
        token: &dyn CancellationToken,
        item: &Self::Item,
        bin: &Self::Bin,
    ) -> Result<(), Self::Error>;

    /// Capacity still unused in `bin`. Never exceeds [`capacity`](Self::capacity).
    fn remaining(&self, bin: &Self::Bin) -> Space;

    /// The bin this mechanism currently considers active.
    ///
    /// Used to re-bind a strategy to in-progress mechanism state.
    fn current(&self) -> Self::Bin;
}
