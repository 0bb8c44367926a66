pub mod kv;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;

pub use kv::{KeyValueStore, PENDING_ROLE_KEY, SESSION_KEY};

/// The store backing the running platform.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = LocalStorageStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = FileStore;

/// Create the platform-appropriate durable store.
///
/// - **Web** (WASM + `web` feature): `window.localStorage`
/// - **Native**: one file per key under `<data_dir>/jobkonnect/`
pub fn make_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        LocalStorageStore::new()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("jobkonnect");
        FileStore::new(base)
    }
}
