//! Cooperative cancellation shared between a builder and its workers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

const IDLE: u8 = 0;
const CANCELLED: u8 = 1;
const FINISHED: u8 = 2;

/// Cloneable handle for cancelling an index build.
///
/// Workers poll [`is_cancelled`](Self::is_cancelled); nothing is interrupted
/// preemptively. Once a build has finished, [`cancel`](Self::cancel) is a no-op
/// until the next build starts. A cancelled token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<AtomicU8>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent and safe to call at any time.
    pub fn cancel(&self) {
        let _ = self
            .state
            .compare_exchange(IDLE, CANCELLED, Ordering::AcqRel, Ordering::Acquire);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::Acquire) == CANCELLED
    }

    /// Re-arm a finished token for another build
    pub(crate) fn begin(&self) {
        let _ = self
            .state
            .compare_exchange(FINISHED, IDLE, Ordering::AcqRel, Ordering::Acquire);
    }

    /// Mark the build finished. Returns false if cancellation won the race.
    pub(crate) fn finish(&self) -> bool {
        self.state
            .compare_exchange(IDLE, FINISHED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
