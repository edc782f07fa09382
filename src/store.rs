//! ==============================================================================
//! store.rs - latest reading + bounded history
//! ==============================================================================
//!
//! purpose:
//!     holds what the pico has told us so far:
//!     - latest: the most recent reading (none until the first ingest)
//!     - history: the last HISTORY_CAPACITY readings, oldest first
//!
//! concurrency:
//!     both fields live behind one arc<rwlock<>> so an ingest updates them
//!     together. readers clone out under the read lock and never see a
//!     half-applied ingest or a history longer than the capacity.
//!
//! ==============================================================================

use crate::domain::{now_ms, RawReadingFields, Reading};

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// number of readings kept in the rolling history
pub const HISTORY_CAPACITY: usize = 100;

#[derive(Default)]
struct StoreState {
    latest: Option<Reading>,
    history: VecDeque<Reading>,
}

/// clone-able handle to the shared reading store
#[derive(Clone)]
pub struct ReadingStore {
    inner: Arc<RwLock<StoreState>>,
    capacity: usize,
}

impl Default for ReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingStore {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// store with a custom history bound (clamped to at least 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(RwLock::new(StoreState {
                latest: None,
                history: VecDeque::with_capacity(capacity),
            })),
            capacity,
        }
    }

    /// stamp and record a new reading, returning what was stored
    pub async fn ingest(&self, raw: &RawReadingFields) -> Reading {
        let reading = Reading::from_raw(raw, now_ms());
        self.push(reading.clone()).await;
        reading
    }

    async fn push(&self, reading: Reading) {
        let mut state = self.inner.write().await;
        state.history.push_back(reading.clone());
        if state.history.len() > self.capacity {
            state.history.pop_front();
        }
        state.latest = Some(reading);
    }

    /// most recent reading, `None` before the first ingest
    pub async fn latest(&self) -> Option<Reading> {
        self.inner.read().await.latest.clone()
    }

    /// owned snapshot of the history, oldest first
    pub async fn history(&self) -> Vec<Reading> {
        self.inner.read().await.history.iter().cloned().collect()
    }

    #[allow(dead_code)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.history.len()
    }

    #[allow(dead_code)]
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
