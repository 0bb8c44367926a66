//! # Filesystem-backed key/value store
//!
//! [`FileStore`] keeps each key in its own file under a base directory. It backs
//! native builds so a persisted session survives restarts the way the browser's
//! `localStorage` does on the web.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── pendingRole
//! └── jobkonnect-auth-session
//! ```
//!
//! | Platform | Base path (via [`dirs::data_dir()`]) |
//! |----------|------|
//! | macOS | `~/Library/Application Support/jobkonnect/` |
//! | Linux | `~/.local/share/jobkonnect/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\jobkonnect\` |

use std::path::PathBuf;

use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are flat names; strip separators so a key can never escape `base`.
        let name: String = key
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    async fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create store directory {:?}: {}", self.base, e);
            return;
        }
        if let Err(e) = std::fs::write(self.key_path(key), value) {
            tracing::warn!("Failed to write key {}: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("jobkonnect");

        let store = FileStore::new(base.clone());
        assert!(store.get("pendingRole").await.is_none());
        store.set("pendingRole", "employer").await;

        // A fresh instance over the same directory sees the value
        let reopened = FileStore::new(base);
        assert_eq!(reopened.get("pendingRole").await.as_deref(), Some("employer"));

        reopened.remove("pendingRole").await;
        assert!(store.get("pendingRole").await.is_none());
    }

    #[tokio::test]
    async fn test_key_cannot_escape_base() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("inner"));

        store.set("../outside", "x").await;
        assert!(!dir.path().join("outside").exists());
        assert_eq!(store.get("../outside").await.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        store.remove("never-written").await;
        assert!(store.get("never-written").await.is_none());
    }
}
