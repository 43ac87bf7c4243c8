use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use tokio::sync::Notify;

/// One-shot countdown gate.
///
/// The count only decreases. Once it reaches zero, every current and future
/// [`wait`](CountdownGate::wait) returns immediately and permanently; there
/// is no reset. Signaling past zero is a no-op.
#[derive(Debug, Clone)]
pub struct CountdownGate {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    remaining: AtomicUsize,
    released: Notify,
}

impl CountdownGate {
    pub fn new(count: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                remaining: AtomicUsize::new(count),
                released: Notify::new(),
            }),
        }
    }

    /// Decrements the count, waking all waiters when it reaches zero.
    pub fn signal(&self) {
        let mut current = self.shared.remaining.load(Ordering::Acquire);
        loop {
            if current == 0 {
                return;
            }
            match self.shared.remaining.compare_exchange_weak(
                current,
                current - 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    if current == 1 {
                        self.shared.released.notify_waiters();
                    }
                    return;
                }
                Err(observed) => current = observed,
            }
        }
    }

    /// Returns once the count has reached zero.
    pub async fn wait(&self) {
        loop {
            // Register before checking so a concurrent `signal` cannot slip
            // between the check and the await.
            let released = self.shared.released.notified();
            if self.is_released() {
                return;
            }
            released.await;
        }
    }

    /// Whether the count has already reached zero.
    pub fn is_released(&self) -> bool {
        self.shared.remaining.load(Ordering::Acquire) == 0
    }
}
