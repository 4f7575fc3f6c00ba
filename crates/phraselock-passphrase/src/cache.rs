// SPDX-FileCopyrightText: 2026 Phraselock Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cache of validated managers keyed by state string.
//!
//! Key derivation is deliberately slow, so once a state has been unlocked the
//! manager is reused for every later lookup of the same state. The lock is
//! held only for map access, never across key derivation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::manager::PassphraseManager;

/// Map from state string to the single manager built for it.
#[derive(Debug, Default)]
pub struct ManagerCache {
    managers: Mutex<HashMap<String, Arc<PassphraseManager>>>,
}

impl ManagerCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<PassphraseManager>>> {
        // Poisoning is ignored: no map operation here can be left half-applied.
        self.managers.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, state: &str) -> Option<Arc<PassphraseManager>> {
        let hit = self.lock().get(state).cloned();
        debug!(hit = hit.is_some(), "manager cache lookup");
        hit
    }

    /// Insert a manager, replacing any previous entry (last writer wins).
    pub fn put(&self, state: impl Into<String>, manager: Arc<PassphraseManager>) {
        self.lock().insert(state.into(), manager);
    }

    /// Return the cached manager for `state`, inserting `manager` if none exists.
    pub fn get_or_insert(
        &self,
        state: &str,
        manager: Arc<PassphraseManager>,
    ) -> Arc<PassphraseManager> {
        self.lock()
            .entry(state.to_string())
            .or_insert(manager)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every cached manager. Intended for resetting between tests.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::ManagerState;

    fn locked(state: &str) -> Arc<PassphraseManager> {
        Arc::new(PassphraseManager::locked(ManagerState {
            salt: state.to_string(),
        }))
    }

    #[test]
    fn get_returns_what_was_put() {
        let cache = ManagerCache::new();
        assert!(cache.get("s").is_none());

        let sm = locked("s");
        cache.put("s", sm.clone());
        assert!(Arc::ptr_eq(&cache.get("s").unwrap(), &sm));
    }

    #[test]
    fn put_is_last_writer_wins() {
        let cache = ManagerCache::new();
        let first = locked("s");
        let second = locked("s");
        cache.put("s", first);
        cache.put("s", second.clone());
        assert!(Arc::ptr_eq(&cache.get("s").unwrap(), &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn get_or_insert_keeps_existing_instance() {
        let cache = ManagerCache::new();
        let first = cache.get_or_insert("s", locked("s"));
        let second = cache.get_or_insert("s", locked("s"));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ManagerCache::new();
        cache.put("a", locked("a"));
        cache.put("b", locked("b"));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn shared_across_threads() {
        let cache = Arc::new(ManagerCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    let state = format!("state-{}", i % 2);
                    cache.get_or_insert(&state, locked(&state))
                })
            })
            .collect();
        let managers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(cache.len(), 2);
        for sm in &managers {
            assert!(Arc::ptr_eq(sm, &cache.get(sm.state_str()).unwrap()));
        }
    }
}
