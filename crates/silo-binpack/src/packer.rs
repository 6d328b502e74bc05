//! Packing strategies.
//!
//! Bin-packing problem: <https://en.wikipedia.org/wiki/Bin_packing_problem>

use crate::binner::Binner;
use crate::cancel::CancellationToken;
use crate::error::PackError;
use crate::space::BinHandle;
use async_trait::async_trait;
use tracing::debug;

/// Outcome of one packing decision.
///
/// A transient report: both fields are bin handles, discarded after the
/// caller reads them. The caller threads `next` back in as the candidate bin
/// for the following item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packed<B> {
    /// Bin that received the item.
    pub added_to: B,
    /// Bin the next item should be offered to.
    pub next: B,
}

/// Implemented by types defining a packing strategy.
#[async_trait]
pub trait Packer<M: Binner>: Sized {
    /// Bind the strategy to `binner`, eagerly opening a first bin.
    async fn bind_new(binner: M) -> Result<(Self, M::Bin), PackError<M::Error>>;

    /// Bind the strategy to a mechanism whose current bin is already open.
    fn bind_current(binner: M) -> Self;

    /// Decide where `item` goes, driving the mechanism through any rollover.
    async fn pack(
        &self,
        token: &dyn CancellationToken,
        item: &M::Item,
        bin: M::Bin,
    ) -> Result<Packed<M::Bin>, PackError<M::Error>>;
}

/// Greedy single-bin packing strategy.
///
/// Always tries the candidate bin, rolling over to a freshly opened bin on
/// overflow or exact fill. Holds nothing beyond the mechanism binding; bin
/// identity flows through call arguments and results.
#[derive(Debug)]
pub struct NaivePacker<M> {
    binner: M,
}

// Future work: first-fit and modified first-fit strategies that look ahead
// across multiple open bins.

impl<M: Binner> NaivePacker<M> {
    /// Build a `NaivePacker` bound to `binner`, returning it together with
    /// its freshly opened first bin.
    pub async fn new(binner: M) -> Result<(Self, M::Bin), PackError<M::Error>> {
        <Self as Packer<M>>::bind_new(binner).await
    }

    /// The bound mechanism.
    pub fn binner(&self) -> &M {
        &self.binner
    }

    /// Close `bin` and open its replacement, in that order.
    async fn close_and_open_new(&self, bin: &M::Bin) -> Result<M::Bin, PackError<M::Error>> {
        self.binner.close(bin);
        self.binner
            .allocate()
            .await
            .map_err(|source| PackError::Allocate { source })
    }
}

#[async_trait]
impl<M: Binner> Packer<M> for NaivePacker<M> {
    async fn bind_new(binner: M) -> Result<(Self, M::Bin), PackError<M::Error>> {
        let bin = binner
            .allocate()
            .await
            .map_err(|source| PackError::Allocate { source })?;
        Ok((Self { binner }, bin))
    }

    fn bind_current(binner: M) -> Self {
        Self { binner }
    }

    async fn pack(
        &self,
        token: &dyn CancellationToken,
        item: &M::Item,
        bin: M::Bin,
    ) -> Result<Packed<M::Bin>, PackError<M::Error>> {
        let size = self.binner.item_cost(item);
        let capacity = self.binner.capacity();
        if size > capacity {
            return Err(PackError::ItemTooLarge {
                item: size,
                capacity,
            });
        }

        // Rollover is a loop rather than a recursive call; the oversize check
        // above bounds it to two iterations.
        let mut bin = bin;
        loop {
            let remaining = self.binner.remaining(&bin);
            debug!(bin = %bin.id(), %size, %capacity, %remaining, "packing item");

            if size > remaining {
                // The candidate bin cannot absorb the item. Retrying against
                // the replacement also covers the item exactly filling an
                // empty bin, which closes the replacement in turn.
                debug!(bin = %bin.id(), "bin cannot absorb item, rolling over");
                bin = self.close_and_open_new(&bin).await?;
                continue;
            }

            self.binner
                .place(token, item, &bin)
                .await
                .map_err(|source| PackError::Place {
                    bin: bin.id(),
                    source,
                })?;

            if size == remaining {
                debug!(bin = %bin.id(), "bin filled exactly, closing");
                let next = self.close_and_open_new(&bin).await?;
                return Ok(Packed {
                    added_to: bin,
                    next,
                });
            }

            return Ok(Packed {
                added_to: bin.clone(),
                next: bin,
            });
        }
    }
}
