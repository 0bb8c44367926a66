//! # Durable key/value storage
//!
//! [`KeyValueStore`] is the small async interface the front end uses for values
//! that must outlive the page: the persisted identity session and the role a user
//! picked before leaving for an OAuth provider. Implementations live in sibling
//! modules ([`crate::MemoryStore`], `FileStore`, `LocalStorageStore`).
//!
//! Implementations swallow backend errors. A failed read is `None`, a failed write
//! is logged and dropped, so a broken store degrades to "nothing remembered".

/// Key holding the role chosen before an OAuth redirect.
pub const PENDING_ROLE_KEY: &str = "pendingRole";

/// Key holding the serialised identity session.
pub const SESSION_KEY: &str = "jobkonnect-auth-session";

/// Async trait for string values addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Option<String>>;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = ()>;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = ()>;

    /// Read a value and remove it in the same step.
    fn take(&self, key: &str) -> impl std::future::Future<Output = Option<String>> {
        async move {
            let value = self.get(key).await;
            if value.is_some() {
                self.remove(key).await;
            }
            value
        }
    }
}
