//! Silo Testing Infrastructure
//!
//! Deterministic test doubles and proptest strategies for the packing
//! library. Mechanism mocks live here, never in the library crate.
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! silo-testkit = { path = "../silo-testkit" }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod cancel;
pub mod memory;
pub mod strategies;

pub use cancel::ManualCancel;
pub use memory::{BinSnapshot, MemoryBin, MemoryBinError, MemoryBinner};
