//! List Synchronizer
//!
//! Holds the fetched collection for display and keeps it consistent with
//! the server: every successful mutation triggers a full reload, there is
//! no incremental patching and no optimistic insert.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ApiError;
use crate::record::Record;

/// Snapshot of the fetched collection.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CollectionState {
    /// Records in server-provided order.
    pub records: Vec<Record>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Collection state plus the fetch-generation fence.
///
/// Overlapping fetches are not cancelled; instead each fetch carries the
/// generation it was issued under, and `complete` discards any response
/// whose generation is no longer current. The latest-issued fetch wins.
pub struct ListSynchronizer {
    state: RwLock<CollectionState>,
    generation: AtomicU64,
}

impl ListSynchronizer {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CollectionState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Start a fetch: flags loading, clears the previous error, and returns
    /// the generation token the response must present to `complete`.
    pub fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.write();
        state.loading = true;
        state.error = None;
        generation
    }

    /// Apply a fetch outcome. A failed fetch empties the records rather
    /// than keeping the previous ones. Returns false when the generation is
    /// stale and the outcome was discarded untouched.
    pub fn complete(&self, generation: u64, outcome: Result<Vec<Record>, ApiError>) -> bool {
        let mut state = self.state.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding stale collection fetch");
            return false;
        }

        match outcome {
            Ok(records) => {
                state.records = records;
                state.error = None;
            }
            Err(error) => {
                tracing::warn!(%error, "collection fetch failed");
                state.records = Vec::new();
                state.error = Some(error.to_string());
            }
        }
        state.loading = false;
        true
    }

    pub fn snapshot(&self) -> CollectionState {
        self.state.read().clone()
    }
}

impl Default for ListSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}
