//! Property test strategies for packing types.
//!
//! These strategies generate admissible packing inputs: costs bounded by a
//! bin capacity, so sequences can always be packed without tripping the
//! oversize rejection.

use proptest::prelude::*;
use silo_binpack::Space;

// Re-export proptest for convenience
pub use proptest;

/// Strategy for space values in `0..=max`.
pub fn arb_space(max: u64) -> impl Strategy<Value = Space> {
    (0..=max).prop_map(Space::new)
}

/// Strategy for nonzero item cost sequences where every cost fits a bin of
/// `capacity`.
///
/// # Example
///
/// ```rust
/// use silo_testkit::strategies::arb_item_costs;
/// use proptest::prelude::*;
///
/// proptest! {
///     #[test]
///     fn costs_are_admissible(costs in arb_item_costs(16, 32)) {
///         assert!(costs.iter().all(|c| c.value() >= 1 && c.value() <= 16));
///     }
/// }
/// ```
pub fn arb_item_costs(capacity: u64, max_len: usize) -> impl Strategy<Value = Vec<Space>> {
    prop::collection::vec((1..=capacity).prop_map(Space::new), 0..=max_len)
}
