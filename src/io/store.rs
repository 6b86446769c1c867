//! In-memory id-keyed storage for atlases and maps
//!
//! Inserts and reads are serialized by a mutex; a reader always sees its own
//! writes for an id. There is no persistence and no querying beyond exact
//! id lookup.

use rand::Rng;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe key-value store owning cloned records
#[derive(Debug)]
pub struct MemoryStore<T> {
    entries: Mutex<HashMap<String, T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Clone> MemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // Every critical section is a single map operation, so poisoning is ignored
    fn lock(&self) -> MutexGuard<'_, HashMap<String, T>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace a record
    pub fn put(&self, id: &str, value: T) {
        self.lock().insert(id.to_string(), value);
    }

    /// Clone of the record stored under `id`
    pub fn get(&self, id: &str) -> Option<T> {
        self.lock().get(id).cloned()
    }

    /// Mutate the record stored under `id` in place
    ///
    /// Returns `None` without calling `update` when the id is unknown.
    pub fn update<R>(&self, id: &str, update: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.lock().get_mut(id).map(update)
    }

    /// Check whether a record exists
    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Generate a fresh identifier such as `atlas_5f3a9c0d12e4b7a1`
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{:016x}", rand::rng().random::<u64>())
}
