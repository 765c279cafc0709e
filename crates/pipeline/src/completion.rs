use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Single-shot session-completion signal.
///
/// Either terminal event sink may set it; the first `set` wins and
/// every later call is a no-op. The waiter creates its `Notified`
/// future before re-checking the flag, so a `set` racing with `wait`
/// cannot be lost.
#[derive(Clone, Default)]
pub struct Completion {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    done: AtomicBool,
    notify: Notify,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the session complete. Returns `true` only for the call
    /// that performed the transition.
    pub fn set(&self) -> bool {
        if self.inner.done.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.inner.notify.notify_waiters();
        true
    }

    pub fn is_set(&self) -> bool {
        self.inner.done.load(Ordering::Acquire)
    }

    /// Blocks until the signal is set. Returns immediately if it
    /// already was.
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_set() {
                return;
            }
            notified.await;
        }
    }
}
