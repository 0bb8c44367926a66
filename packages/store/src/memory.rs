use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::kv::KeyValueStore;

/// In-memory KeyValueStore for testing and non-browser fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    async fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::PENDING_ROLE_KEY;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.is_none());

        store.set("a", "1").await;
        assert_eq!(store.get("a").await.as_deref(), Some("1"));

        // Overwrite keeps a single entry
        store.set("a", "2").await;
        assert_eq!(store.get("a").await.as_deref(), Some("2"));
        assert_eq!(store.len(), 1);

        store.remove("a").await;
        assert!(store.get("a").await.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_take_clears_key() {
        let store = MemoryStore::new();
        store.set(PENDING_ROLE_KEY, "job_seeker").await;

        assert_eq!(store.take(PENDING_ROLE_KEY).await.as_deref(), Some("job_seeker"));
        assert!(store.get(PENDING_ROLE_KEY).await.is_none());
        assert!(store.take(PENDING_ROLE_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_values() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v").await;
        assert_eq!(other.get("k").await.as_deref(), Some("v"));
    }
}
