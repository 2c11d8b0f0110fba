//! Cross-process change detection for the cached document.
//!
//! # Responsibility
//! - Tell a long-running viewer when another process saved a new document.
//!
//! # Invariants
//! - A watcher reports each revision change once.
//! - A removed entry counts as a change (the revision still moves).

use crate::repo::cache_repo::{CacheResult, DocumentCache};
use log::debug;

/// Polls the revision counter of one cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheWatcher {
    key: String,
    last_seen: u64,
}

impl CacheWatcher {
    /// Starts watching `key` from its current revision.
    pub fn new<C: DocumentCache>(cache: &C, key: impl Into<String>) -> CacheResult<Self> {
        let key = key.into();
        let last_seen = cache.revision(&key)?;
        Ok(Self { key, last_seen })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn last_seen(&self) -> u64 {
        self.last_seen
    }

    /// Returns `true` when the revision moved since the previous poll.
    pub fn poll<C: DocumentCache>(&mut self, cache: &C) -> CacheResult<bool> {
        let revision = cache.revision(&self.key)?;
        if revision == self.last_seen {
            return Ok(false);
        }
        debug!(
            "event=cache_change module=watch status=ok key={} from={} to={}",
            self.key, self.last_seen, revision
        );
        self.last_seen = revision;
        Ok(true)
    }
}
