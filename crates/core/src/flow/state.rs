//! Shared, lock-guarded flow state.

use std::sync::Arc;
use tokio::sync::RwLock;

/// Handle to the state record of one flow run.
///
/// Cloning the handle shares the same state. Reads return a full snapshot
/// and writes apply a whole mutation under an exclusive lock, so concurrent
/// steps never observe a partial update. The lock is never held across an
/// `.await` in caller code.
#[derive(Debug)]
pub struct StateHandle<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Clone for StateHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Clone + Send + Sync> StateHandle<S> {
    pub fn new(state: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Clone the current state.
    pub async fn snapshot(&self) -> S {
        self.inner.read().await.clone()
    }

    /// Read a projection of the state without cloning all of it.
    pub async fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard)
    }

    /// Apply `f` atomically.
    pub async fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut guard = self.inner.write().await;
        f(&mut guard)
    }
}
