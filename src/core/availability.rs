use crate::domain::model::GiftDefinition;
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{StorageError, StorageResult};

pub const DEFAULT_KEY_PREFIX: &str = "localGiftAvailability:";

/// Remaining-supply counters for limited gifts.
///
/// Storage failures never escape: they are logged and replaced by the
/// definition's total supply (or total supply minus one after a purchase).
/// `decrease_availability` is a plain read-then-write, so two writers sharing
/// a store can lose an update.
pub struct AvailabilityTracker<S: KeyValueStore> {
    store: S,
    key_prefix: String,
}

impl<S: KeyValueStore> AvailabilityTracker<S> {
    pub fn new(store: S) -> Self {
        Self::with_prefix(store, DEFAULT_KEY_PREFIX)
    }

    pub fn with_prefix(store: S, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn storage_key(&self, definition: &GiftDefinition) -> String {
        format!("{}{}", self.key_prefix, definition.id)
    }

    /// Returns `None` for unlimited gifts.
    pub fn get_availability(&self, definition: &GiftDefinition) -> Option<u32> {
        let supply = definition.total_supply?;

        match self.read_or_init(definition, supply) {
            Ok(remaining) => Some(remaining),
            Err(e) => {
                tracing::warn!(
                    gift = %definition.id,
                    error = %e,
                    "Failed to access storage for gift availability"
                );
                Some(supply)
            }
        }
    }

    /// Records one purchase and returns the new remaining count, never below zero.
    pub fn decrease_availability(&self, definition: &GiftDefinition) -> Option<u32> {
        let supply = definition.total_supply?;

        match self.decrement(definition, supply) {
            Ok(remaining) => {
                tracing::debug!(gift = %definition.id, remaining, "Gift availability decreased");
                Some(remaining)
            }
            Err(e) => {
                tracing::warn!(
                    gift = %definition.id,
                    error = %e,
                    "Failed to update gift availability in storage"
                );
                Some(supply.saturating_sub(1))
            }
        }
    }

    fn read_or_init(&self, definition: &GiftDefinition, supply: u32) -> StorageResult<u32> {
        let key = self.storage_key(definition);
        match self.read(&key)? {
            Some(remaining) => Ok(remaining),
            None => {
                self.store.set(&key, &supply.to_string())?;
                Ok(supply)
            }
        }
    }

    fn decrement(&self, definition: &GiftDefinition, supply: u32) -> StorageResult<u32> {
        let key = self.storage_key(definition);
        let current = self.read(&key)?.unwrap_or(supply);
        let next = current.saturating_sub(1);
        self.store.set(&key, &next.to_string())?;
        Ok(next)
    }

    fn read(&self, key: &str) -> StorageResult<Option<u32>> {
        match self.store.get(key)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map(Some)
                .map_err(|_| StorageError::Corrupt {
                    key: key.to_string(),
                    value: raw,
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{DisabledStore, MemoryStore};
    use crate::core::catalog::Catalog;

    fn flowers() -> &'static GiftDefinition {
        Catalog::builtin().get_definition("gift-flowers").unwrap()
    }

    #[test]
    fn test_unlimited_has_no_record() {
        let tracker = AvailabilityTracker::new(MemoryStore::new());
        let sweets = Catalog::builtin().get_definition("gift-sweets").unwrap();
        assert_eq!(tracker.get_availability(sweets), None);
        assert_eq!(tracker.decrease_availability(sweets), None);
        assert!(tracker.store().is_empty().unwrap());
    }

    #[test]
    fn test_first_read_initialises_record() {
        let tracker = AvailabilityTracker::new(MemoryStore::new());
        assert_eq!(tracker.get_availability(flowers()), Some(1000));
        assert_eq!(
            tracker.store().get("localGiftAvailability:gift-flowers").unwrap(),
            Some("1000".to_string())
        );
        assert_eq!(tracker.get_availability(flowers()), Some(1000));
    }

    #[test]
    fn test_decrease_persists() {
        let tracker = AvailabilityTracker::new(MemoryStore::new());
        assert_eq!(tracker.decrease_availability(flowers()), Some(999));
        assert_eq!(tracker.get_availability(flowers()), Some(999));
    }

    #[test]
    fn test_decrease_floors_at_zero() {
        let store = MemoryStore::new();
        store.set("localGiftAvailability:gift-flowers", "1").unwrap();
        let tracker = AvailabilityTracker::new(store);
        assert_eq!(tracker.decrease_availability(flowers()), Some(0));
        assert_eq!(tracker.decrease_availability(flowers()), Some(0));
    }

    #[test]
    fn test_disabled_store_falls_back() {
        let tracker = AvailabilityTracker::new(DisabledStore);
        assert_eq!(tracker.get_availability(flowers()), Some(1000));
        assert_eq!(tracker.decrease_availability(flowers()), Some(999));
        assert_eq!(tracker.decrease_availability(flowers()), Some(999));
    }

    #[test]
    fn test_corrupt_value_falls_back() {
        let store = MemoryStore::new();
        store.set("localGiftAvailability:gift-flowers", "lots").unwrap();
        let tracker = AvailabilityTracker::new(store);
        assert_eq!(tracker.get_availability(flowers()), Some(1000));
        assert_eq!(tracker.decrease_availability(flowers()), Some(999));
        // the corrupt value is left in place
        assert_eq!(
            tracker.store().get("localGiftAvailability:gift-flowers").unwrap(),
            Some("lots".to_string())
        );
    }

    #[test]
    fn test_trailing_garbage_is_corrupt() {
        let store = MemoryStore::new();
        store.set("localGiftAvailability:gift-flowers", "12abc").unwrap();
        let tracker = AvailabilityTracker::new(store);
        assert!(matches!(
            tracker.read("localGiftAvailability:gift-flowers"),
            Err(StorageError::Corrupt { .. })
        ));
        assert_eq!(tracker.get_availability(flowers()), Some(1000));
    }

    #[test]
    fn test_custom_prefix() {
        let tracker = AvailabilityTracker::with_prefix(MemoryStore::new(), "shop:");
        assert_eq!(tracker.storage_key(flowers()), "shop:gift-flowers");
        tracker.get_availability(flowers());
        assert!(tracker.store().get("shop:gift-flowers").unwrap().is_some());
    }
}
