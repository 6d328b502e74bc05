//! Property tests for packing invariants.
//!
//! The mechanism under test is fully in-memory, so the async surface is
//! driven with `futures::executor::block_on` inside each proptest case.

use futures::executor::block_on;
use proptest::prelude::*;
use silo_binpack::{Binner, NaivePacker, NeverCancel, Packer, Space};
use silo_testkit::strategies::{arb_item_costs, arb_space};
use silo_testkit::{BinSnapshot, MemoryBinner};

const CAPACITY: u64 = 16;

fn pack_all(costs: &[Space]) -> (MemoryBinner, Vec<BinSnapshot>) {
    let binner = MemoryBinner::new(Space::new(CAPACITY));
    block_on(async {
        let (packer, mut bin) = NaivePacker::new(binner.clone()).await.unwrap();
        for cost in costs {
            let packed = packer.pack(&NeverCancel, cost, bin).await.unwrap();
            bin = packed.next;
        }
    });
    let snapshot = binner.snapshot();
    (binner, snapshot)
}

proptest! {
    /// Property: no bin ever holds more than the mechanism's fixed capacity,
    /// and every bin's accounting balances.
    #[test]
    fn prop_capacity_respected(costs in arb_item_costs(CAPACITY, 32)) {
        let (_binner, snapshot) = pack_all(&costs);

        for bin in &snapshot {
            let placed: u64 = bin.items.iter().map(|c| c.value()).sum();
            prop_assert!(
                placed <= CAPACITY,
                "bin {} holds {} over capacity {}",
                bin.id,
                placed,
                CAPACITY
            );
            prop_assert_eq!(placed + bin.remaining.value(), CAPACITY);
        }
    }

    /// Property: packing loses nothing and invents nothing. Every cost lands
    /// in exactly one bin, in submission order across the bin sequence.
    #[test]
    fn prop_items_conserved(costs in arb_item_costs(CAPACITY, 32)) {
        let (_binner, snapshot) = pack_all(&costs);

        let replayed: Vec<Space> = snapshot
            .iter()
            .flat_map(|bin| bin.items.iter().copied())
            .collect();
        prop_assert_eq!(replayed, costs);
    }

    /// Property: the bin offered for the next item is always open and has
    /// space left; closed bins stay closed.
    #[test]
    fn prop_next_bin_is_usable(costs in arb_item_costs(CAPACITY, 32)) {
        let binner = MemoryBinner::new(Space::new(CAPACITY));
        let outcome = block_on(async {
            let (packer, mut bin) = NaivePacker::new(binner.clone()).await.unwrap();
            for cost in &costs {
                let packed = packer.pack(&NeverCancel, cost, bin).await.unwrap();
                if binner.is_closed(&packed.next) || binner.remaining(&packed.next) == Space::ZERO {
                    return Err(packed.next);
                }
                bin = packed.next;
            }
            Ok(())
        });
        prop_assert!(outcome.is_ok(), "unusable next bin {:?}", outcome);

        // Admissible costs always fit a fresh bin, so no bin ever closes
        // empty.
        for bin in binner.snapshot() {
            if !bin.open {
                prop_assert!(!bin.items.is_empty(), "bin {} closed empty", bin.id);
            }
        }
    }

    /// Property: a cost above capacity is always rejected without touching
    /// any bin, whatever the candidate bin's fill level.
    #[test]
    fn prop_oversize_always_rejected(
        prefill in arb_space(CAPACITY),
        oversize in (CAPACITY + 1..=2 * CAPACITY).prop_map(Space::new),
    ) {
        let binner = MemoryBinner::new(Space::new(CAPACITY));
        let err = block_on(async {
            let (packer, mut bin) = NaivePacker::new(binner.clone()).await.unwrap();
            if prefill > Space::ZERO {
                bin = packer.pack(&NeverCancel, &prefill, bin).await.unwrap().next;
            }
            let before = binner.snapshot();
            let err = packer.pack(&NeverCancel, &oversize, bin).await.unwrap_err();
            assert_eq!(binner.snapshot(), before);
            err
        });
        prop_assert!(err.is_item_too_large());
    }
}
