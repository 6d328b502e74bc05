//! # Silo Binpack - Admission Core
//!
//! **Purpose**: Decide how variable-sized items are grouped into
//! fixed-capacity bins before a storage node commits them.
//!
//! The crate is split along a capability boundary:
//!
//! - **Mechanism** ([`Binner`]): bin lifecycle, size accounting, and the
//!   physical placement of items. Implemented by the embedding storage
//!   subsystem; this crate never defines what a bin or an item *is*.
//! - **Strategy** ([`Packer`]): the decision procedure mapping items onto
//!   bins, driving a mechanism through its lifecycle calls. One strategy is
//!   realized: the greedy single-bin [`NaivePacker`].
//!
//! A caller binds a strategy to a mechanism (opening a fresh bin, or adopting
//! the mechanism's current one), then feeds items through [`Packer::pack`],
//! threading each result's `next` bin back in as the candidate for the
//! following item.
//!
//! ## What's NOT in this crate
//!
//! - Concrete bin representations or item formats (mechanism's business)
//! - Multi-bin lookahead strategies (first-fit and friends)
//! - Persistence, networking, retries (the embedding node's business)
//!
//! A strategy instance and the bin it is tracking are meant to be driven by
//! exactly one logical caller at a time; callers packing concurrently from a
//! shared mechanism must serialize access themselves.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Mechanism abstraction consumed by packing strategies
pub mod binner;

/// Cooperative cancellation threaded through placement calls
pub mod cancel;

/// Packing error types
pub mod error;

/// Packing strategies and the packing result type
pub mod packer;

/// Scalar size and bin identity types
pub mod space;

pub use binner::Binner;
pub use cancel::{CancellationToken, NeverCancel};
pub use error::PackError;
pub use packer::{NaivePacker, Packed, Packer};
pub use space::{BinHandle, BinId, Space};
