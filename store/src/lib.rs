pub mod models;

mod backend;
pub use backend::{SessionBackend, SESSION_KEY};

mod memory;
pub use memory::MemoryBackend;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileBackend;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageBackend;

pub use models::Session;
