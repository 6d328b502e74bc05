//! Runtime-agnostic cooperative cancellation.
//!
//! Placement can involve real I/O, so [`Binner::place`](crate::Binner::place)
//! receives a cancellation token. Strategies forward the token unmodified and
//! never act on it themselves; honoring it is entirely the mechanism's
//! business.

use async_trait::async_trait;

/// Cooperative cancellation token.
#[async_trait]
pub trait CancellationToken: Send + Sync {
    /// Resolves when cancellation is requested.
    async fn cancelled(&self);

    /// Non-blocking cancellation check.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Cancellation token that never triggers.
///
/// For callers without a cancellation source.
pub struct NeverCancel;

#[async_trait]
impl CancellationToken for NeverCancel {
    async fn cancelled(&self) {
        futures::future::pending::<()>().await;
    }
}
