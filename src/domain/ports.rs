use crate::utils::error::StorageResult;
use std::collections::HashMap;
use std::sync::Arc;

/// Synchronous string key-value store holding availability counters.
///
/// Both operations may fail; callers in the availability layer absorb the
/// failure instead of propagating it.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

pub trait ConfigProvider {
    fn storage_backend(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn key_prefix(&self) -> &str;
    fn asset_base_url(&self) -> &str;
    fn asset_overrides(&self) -> &HashMap<String, String>;
}
