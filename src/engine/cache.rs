//! Parsed-rule memoization.
//!
//! Rule text usually comes from a stylesheet and is re-read on every resize,
//! so the parsed breakpoints are kept under a caller-chosen key (normally the
//! verbatim rule text). Entries are never evicted; [`BreakpointCache::clear`]
//! is the only way to drop them.
//!
//! ## Concurrency
//!
//! `get_or_parse` is a plain check-then-act: two threads missing on the same
//! key both parse and both insert. Both produce the same breakpoints, so the
//! second write is a harmless overwrite. Entries are stored as whole
//! `Arc<[Breakpoint]>` values, so a reader sees either the old set or the new
//! one, never a partial one.

use crate::{Breakpoint, FlexError};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe map from cache key to parsed breakpoints.
#[derive(Debug, Default)]
pub struct BreakpointCache {
    entries: RwLock<HashMap<String, Arc<[Breakpoint]>>>,
}

impl BreakpointCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the breakpoints stored under `key`.
    pub fn get(&self, key: &str) -> Option<Arc<[Breakpoint]>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    /// Store `breakpoints` under `key`, replacing any previous entry.
    pub fn insert(&self, key: impl Into<String>, breakpoints: impl Into<Arc<[Breakpoint]>>) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).insert(key.into(), breakpoints.into());
    }

    /// Return the entry for `key`, running `parse` and storing its result on a
    /// miss. The flag is `true` on a hit.
    ///
    /// Failed parses are not stored.
    pub fn get_or_parse<F>(&self, key: &str, parse: F) -> Result<(Arc<[Breakpoint]>, bool), FlexError>
    where
        F: FnOnce() -> Result<Vec<Breakpoint>, FlexError>,
    {
        if let Some(hit) = self.get(key) {
            tracing::debug!(key, breakpoints = hit.len(), "breakpoint cache hit");
            return Ok((hit, true));
        }

        let parsed: Arc<[Breakpoint]> = parse()?.into();
        tracing::debug!(key, breakpoints = parsed.len(), "breakpoint cache miss, stored");
        self.insert(key, Arc::clone(&parsed));
        Ok((parsed, false))
    }

    /// Whether `key` has an entry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
