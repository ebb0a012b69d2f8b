//! Cooperative cancellation for long-running synthesis

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared stop signal checked by the engine between target pixels
///
/// Clones share the same flag, so one clone can be handed to another thread
/// (or a signal handler) while the engine polls the other. An optional
/// deadline turns the token into a timeout.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// Token that only stops when [`Self::cancel`] is called
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that also stops once `timeout` has elapsed from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::default(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Request cancellation; visible to every clone
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// True once cancelled or past the deadline
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Configured deadline, if any
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
