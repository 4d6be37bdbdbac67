use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Errors returned by key-value store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("key cannot be empty")]
    EmptyKey,
    #[error("key not found")]
    KeyNotFound,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Point operations over a mapping of string keys to string values.
///
/// Implementations must be safe to call from concurrent request handlers.
/// Writes are last-writer-wins and never expose partial values to readers.
pub trait KeyValueStore: Send + Sync {
    /// Read the current value of `key`
    fn get(&self, key: &str) -> StoreResult<String>;

    /// Insert or overwrite `key` unconditionally
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`, failing if it is absent
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Snapshot of the keys present at the instant of the call, in no particular order
    fn keys(&self) -> Vec<String>;

    /// Number of keys present at the instant of the call
    fn size(&self) -> usize;
}

/// In-memory store guarded by a single reader/writer lock.
///
/// Readers (`get`, `keys`, `size`) share the lock; writers (`set`, `delete`)
/// hold it exclusively. Nothing is persisted; the map is dropped with the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the guard cannot leave the map half-written
    // (every mutation is a single HashMap call), so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn ensure_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::EmptyKey);
    }
    Ok(())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<String> {
        ensure_key(key)?;

        self.read().get(key).cloned().ok_or(StoreError::KeyNotFound)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        ensure_key(key)?;

        self.write().insert(key.to_string(), value.to_string());
        tracing::debug!(key, "stored value");
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        ensure_key(key)?;

        match self.write().remove(key) {
            Some(_) => {
                tracing::debug!(key, "deleted key");
                Ok(())
            }
            None => Err(StoreError::KeyNotFound),
        }
    }

    fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    fn size(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_set_then_get_returns_value() {
        let store = MemoryStore::new();

        store.set("foo", "bar").unwrap();
        assert_eq!(store.get("foo").unwrap(), "bar");

        store.set("foo", "baz").unwrap();
        assert_eq!(store.get("foo").unwrap(), "baz");
    }

    #[test]
    fn test_get_missing_key() {
        let store = MemoryStore::new();

        assert_eq!(store.get("nope"), Err(StoreError::KeyNotFound));
    }

    #[test]
    fn test_empty_value_is_stored() {
        let store = MemoryStore::new();

        store.set("blank", "").unwrap();
        assert_eq!(store.get("blank").unwrap(), "");
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();

        assert_eq!(store.delete("foo"), Err(StoreError::KeyNotFound));

        store.set("foo", "bar").unwrap();
        store.delete("foo").unwrap();

        assert_eq!(store.get("foo"), Err(StoreError::KeyNotFound));
        assert_eq!(store.delete("foo"), Err(StoreError::KeyNotFound));
        assert_eq!(store.size(), 0);
    }

    #[test]
    fn test_empty_key_rejected() {
        let store = MemoryStore::new();

        assert_eq!(store.set("", "value"), Err(StoreError::EmptyKey));
        assert_eq!(store.set("", ""), Err(StoreError::EmptyKey));
        assert_eq!(store.get(""), Err(StoreError::EmptyKey));
        assert_eq!(store.delete(""), Err(StoreError::EmptyKey));
        assert_eq!(store.size(), 0);
    }

    #[test]
    fn test_keys_matches_size() {
        let store = MemoryStore::new();
        assert!(store.keys().is_empty());

        for i in 0..25 {
            store.set(&format!("key-{i}"), "v").unwrap();
        }
        store.delete("key-3").unwrap();
        store.set("key-4", "overwritten").unwrap();

        let keys: HashSet<String> = store.keys().into_iter().collect();
        assert_eq!(keys.len(), store.size());
        assert_eq!(store.size(), 24);
        assert!(!keys.contains("key-3"));
        assert!(keys.contains("key-24"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(StoreError::EmptyKey.to_string(), "key cannot be empty");
        assert_eq!(StoreError::KeyNotFound.to_string(), "key not found");
    }

    #[test]
    fn test_concurrent_disjoint_writes() {
        let store = Arc::new(MemoryStore::new());

        thread::scope(|s| {
            for t in 0..8 {
                let store = Arc::clone(&store);
                s.spawn(move || {
                    for i in 0..200 {
                        store.set(&format!("t{t}-{i}"), &format!("{t}:{i}")).unwrap();
                    }
                    for i in (0..200).step_by(2) {
                        store.delete(&format!("t{t}-{i}")).unwrap();
                    }
                });
            }
        });

        assert_eq!(store.size(), 8 * 100);
        for t in 0..8 {
            for i in (1..200).step_by(2) {
                assert_eq!(store.get(&format!("t{t}-{i}")).unwrap(), format!("{t}:{i}"));
            }
        }
    }

    #[test]
    fn test_concurrent_writes_same_key_leave_one_value() {
        let store = Arc::new(MemoryStore::new());
        let written: Vec<String> = (0..16).map(|t| format!("writer-{t}-").repeat(64)).collect();

        thread::scope(|s| {
            for value in &written {
                let store = Arc::clone(&store);
                s.spawn(move || {
                    for _ in 0..100 {
                        store.set("shared", value).unwrap();
                    }
                });
            }
            // Readers run alongside the writers and must only ever see whole values
            for _ in 0..4 {
                let store = Arc::clone(&store);
                let written = &written;
                s.spawn(move || {
                    for _ in 0..500 {
                        if let Ok(value) = store.get("shared") {
                            assert!(written.contains(&value));
                        }
                    }
                });
            }
        });

        let value = store.get("shared").unwrap();
        assert!(written.contains(&value));
        assert_eq!(store.size(), 1);
    }
}
