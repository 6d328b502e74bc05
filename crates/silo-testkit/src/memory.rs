//! Deterministic in-memory mechanism for packing tests.
//!
//! # Blocking Lock Usage
//!
//! Uses `std::sync::Mutex` because this is test infrastructure: tests run in
//! controlled single-threaded contexts, lock contention is not a concern, and
//! the synchronous API keeps assertions clear.

use async_trait::async_trait;
use silo_binpack::{BinHandle, BinId, Binner, CancellationToken, Space};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by the in-memory mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryBinError {
    /// A test armed the next allocation to fail.
    #[error("injected allocation failure")]
    AllocateFailed,
    /// A test armed the next placement to fail.
    #[error("injected placement failure")]
    PlaceFailed,
    /// The caller's token was cancelled before the write happened.
    #[error("placement cancelled")]
    Cancelled,
    /// Placement targeted a bin this mechanism never produced.
    #[error("unknown bin {0}")]
    UnknownBin(BinId),
    /// Placement targeted a closed bin.
    #[error("bin {0} is closed")]
    BinClosed(BinId),
    /// Placement would overflow the bin.
    #[error("bin {0} lacks space for item of cost {1}")]
    Overflow(BinId, Space),
}

/// Bin handle produced by [`MemoryBinner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryBin(BinId);

impl BinHandle for MemoryBin {
    fn id(&self) -> BinId {
        self.0
    }
}

/// Observable state of one bin, for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinSnapshot {
    /// Bin identity.
    pub id: BinId,
    /// Capacity still unused.
    pub remaining: Space,
    /// Whether the bin is still open.
    pub open: bool,
    /// Costs of the items placed so far, in placement order.
    pub items: Vec<Space>,
}

#[derive(Debug)]
struct BinState {
    remaining: Space,
    open: bool,
    items: Vec<Space>,
}

#[derive(Debug)]
struct MemoryState {
    bins: BTreeMap<BinId, BinState>,
    current: Option<MemoryBin>,
    next_id: u64,
    fail_next_allocate: bool,
    fail_next_place: bool,
}

/// Deterministic in-memory [`Binner`].
///
/// Items are plain [`Space`] costs; placing an item just debits the bin's
/// remaining space. Bin identities are handed out sequentially starting at 1,
/// so test runs are reproducible. Cloning yields a handle onto the same
/// mechanism state.
///
/// Placement into a closed or unknown bin is an error: a correct strategy
/// never issues one, and the testkit enforces it so a regression would
/// surface in tests.
#[derive(Debug, Clone)]
pub struct MemoryBinner {
    capacity: Space,
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBinner {
    /// Create a mechanism whose bins all share `capacity`.
    pub fn new(capacity: Space) -> Self {
        Self {
            capacity,
            state: Arc::new(Mutex::new(MemoryState {
                bins: BTreeMap::new(),
                current: None,
                next_id: 1,
                fail_next_allocate: false,
                fail_next_place: false,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap()
    }

    /// Arm the next `allocate` call to fail.
    pub fn fail_next_allocate(&self) {
        self.state().fail_next_allocate = true;
    }

    /// Arm the next `place` call to fail.
    pub fn fail_next_place(&self) {
        self.state().fail_next_place = true;
    }

    /// Whether `bin` has been closed.
    pub fn is_closed(&self, bin: &MemoryBin) -> bool {
        self.state()
            .bins
            .get(&bin.id())
            .is_some_and(|b| !b.open)
    }

    /// Costs placed into `bin` so far, in placement order.
    pub fn items_in(&self, bin: &MemoryBin) -> Vec<Space> {
        self.state()
            .bins
            .get(&bin.id())
            .map(|b| b.items.clone())
            .unwrap_or_default()
    }

    /// How many bins this mechanism has opened in total.
    pub fn allocated_count(&self) -> usize {
        self.state().bins.len()
    }

    /// Snapshot of every bin ever opened, in identity order.
    pub fn snapshot(&self) -> Vec<BinSnapshot> {
        self.state()
            .bins
            .iter()
            .map(|(id, b)| BinSnapshot {
                id: *id,
                remaining: b.remaining,
                open: b.open,
                items: b.items.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl Binner for MemoryBinner {
    type Item = Space;
    type Bin = MemoryBin;
    type Error = MemoryBinError;

    async fn allocate(&self) -> Result<MemoryBin, MemoryBinError> {
        let mut state = self.state();
        if state.fail_next_allocate {
            state.fail_next_allocate = false;
            return Err(MemoryBinError::AllocateFailed);
        }
        let id = BinId::new(state.next_id);
        state.next_id += 1;
        state.bins.insert(
            id,
            BinState {
                remaining: self.capacity,
                open: true,
                items: Vec::new(),
            },
        );
        let bin = MemoryBin(id);
        state.current = Some(bin);
        Ok(bin)
    }

    fn capacity(&self) -> Space {
        self.capacity
    }

    fn close(&self, bin: &MemoryBin) {
        if let Some(entry) = self.state().bins.get_mut(&bin.id()) {
            entry.open = false;
        }
    }

    fn item_cost(&self, item: &Space) -> Space {
        *item
    }

    async fn place(
        &self,
        token: &dyn CancellationToken,
        item: &Space,
        bin: &MemoryBin,
    ) -> Result<(), MemoryBinError> {
        if token.is_cancelled() {
            return Err(MemoryBinError::Cancelled);
        }
        let mut state = self.state();
        if state.fail_next_place {
            state.fail_next_place = false;
            return Err(MemoryBinError::PlaceFailed);
        }
        let entry = state
            .bins
            .get_mut(&bin.id())
            .ok_or(MemoryBinError::UnknownBin(bin.id()))?;
        if !entry.open {
            return Err(MemoryBinError::BinClosed(bin.id()));
        }
        if *item > entry.remaining {
            return Err(MemoryBinError::Overflow(bin.id(), *item));
        }
        entry.remaining = entry.remaining.saturating_sub(*item);
        entry.items.push(*item);
        Ok(())
    }

    fn remaining(&self, bin: &MemoryBin) -> Space {
        self.state()
            .bins
            .get(&bin.id())
            .map(|b| b.remaining)
            .unwrap_or(Space::ZERO)
    }

    fn current(&self) -> MemoryBin {
        // The zero bin stands in until the first allocation.
        self.state().current.unwrap_or(MemoryBin(BinId::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use silo_binpack::NeverCancel;

    #[test]
    fn allocate_tracks_current_bin() {
        let binner = MemoryBinner::new(Space::new(8));
        assert_eq!(binner.current().id(), BinId::ZERO);

        let bin = block_on(binner.allocate()).unwrap();
        assert_eq!(bin.id(), BinId::new(1));
        assert_eq!(binner.current(), bin);
        assert_eq!(binner.remaining(&bin), Space::new(8));
    }

    #[test]
    fn closed_bins_reject_placement() {
        let binner = MemoryBinner::new(Space::new(8));
        let bin = block_on(binner.allocate()).unwrap();
        binner.close(&bin);

        let err = block_on(binner.place(&NeverCancel, &Space::new(1), &bin)).unwrap_err();
        assert_eq!(err, MemoryBinError::BinClosed(bin.id()));
        assert!(binner.items_in(&bin).is_empty());
    }

    #[test]
    fn injected_failures_fire_once() {
        let binner = MemoryBinner::new(Space::new(8));
        binner.fail_next_allocate();
        assert!(block_on(binner.allocate()).is_err());
        assert!(block_on(binner.allocate()).is_ok());
    }
}
