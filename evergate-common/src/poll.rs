//! Shared watchable values fed by background pollers or push subscriptions.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, RwLock,
    },
    time::Duration,
};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A shared slot for an observed on-chain value.
///
/// Writers take a generation token before fetching and commit against it.
/// `reset` and `set` bump the generation, so any fetch that was already in
/// flight when they ran is discarded at commit time. This is what lets a push
/// subscription win over a slower concurrent poll of the same state.
#[derive(Debug)]
pub struct Watched<T> {
    inner: Arc<WatchedInner<T>>,
}

#[derive(Debug)]
struct WatchedInner<T> {
    value: RwLock<Option<T>>,
    generation: AtomicU64,
}

impl<T> Clone for Watched<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T> Default for Watched<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Watched<T> {
    pub fn get(&self) -> Option<T> {
        self.inner
            .value
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl<T> Watched<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(WatchedInner {
                value: RwLock::new(None),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Token to pass to [`Watched::commit`] once the fetch finishes.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    /// Stores the value unless the slot moved on since `generation` was
    /// taken. Returns whether the write landed.
    pub fn commit(&self, generation: u64, value: T) -> bool {
        let mut guard = self
            .inner
            .value
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.inner.generation.load(Ordering::Acquire) != generation {
            return false;
        }
        *guard = Some(value);
        true
    }

    /// Unconditional write from a push subscription. Bumps the generation so
    /// concurrent polls of older state cannot overwrite it.
    pub fn set(&self, value: T) {
        let mut guard = self
            .inner
            .value
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        *guard = Some(value);
    }

    /// Clears the slot and invalidates every in-flight fetch.
    pub fn reset(&self) {
        let mut guard = self
            .inner
            .value
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        *guard = None;
    }
}

/// Spawns a fetch loop feeding `watched` every `interval`. Transient fetch
/// errors are logged and retried on the next tick. The loop ends once a
/// committed value satisfies `is_terminal`.
pub fn start_polling<T, E, F, Fut>(
    watched: Watched<T>,
    interval: Duration,
    is_terminal: impl Fn(&T) -> bool + Send + 'static,
    fetch: F,
) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
    E: std::fmt::Display,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let generation = watched.generation();
            match fetch().await {
                Ok(value) => {
                    let terminal = is_terminal(&value);
                    if !watched.commit(generation, value) {
                        debug!("Discarding stale poll result");
                        continue;
                    }
                    if terminal {
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "Poll fetch failed, retrying on next tick");
                }
            }
        }
    })
}

/// Stops observing a value: aborts the watcher task and returns the slot to
/// unknown. The generation bump in `reset` keeps a commit the aborted cycle
/// already had in flight from resurrecting stale state.
pub fn stop_watching<T>(watched: &Watched<T>, handle: &JoinHandle<()>) {
    handle.abort();
    watched.reset();
}
