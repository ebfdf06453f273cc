// Adapters layer: concrete implementations for external collaborators (storage, assets, export).

pub mod assets;
pub mod export;
pub mod storage;

pub use assets::AssetResolver;
pub use storage::{DisabledStore, FileStore, MemoryStore};
