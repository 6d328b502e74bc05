//! Manually triggered cancellation token for tests.

use async_trait::async_trait;
use silo_binpack::CancellationToken;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation token flipped explicitly by the test.
///
/// There is no waker plumbing: `cancelled` resolves immediately once the
/// token has been triggered and pends forever otherwise, which is all the
/// packing tests need.
#[derive(Debug, Default)]
pub struct ManualCancel(AtomicBool);

impl ManualCancel {
    /// Create an untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CancellationToken for ManualCancel {
    async fn cancelled(&self) {
        if !self.is_cancelled() {
            futures::future::pending::<()>().await;
        }
    }

    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
