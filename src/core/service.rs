use crate::adapters::assets::AssetResolver;
use crate::adapters::storage::{DisabledStore, FileStore, MemoryStore};
use crate::core::availability::AvailabilityTracker;
use crate::core::catalog::{get_level, get_next_level, Catalog};
use crate::core::valuation::{build_instance, clone_for_level};
use crate::domain::model::GiftInstance;
use crate::domain::ports::{ConfigProvider, KeyValueStore};
use crate::utils::error::{GiftError, Result};
use url::Url;

pub const STORAGE_BACKENDS: [&str; 3] = ["file", "memory", "disabled"];

/// Opens the store named by the configured backend.
pub fn open_store<C: ConfigProvider>(config: &C) -> Result<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match config.storage_backend() {
        "file" => Box::new(FileStore::new(config.storage_path())),
        "memory" => Box::new(MemoryStore::new()),
        "disabled" => Box::new(DisabledStore),
        other => {
            return Err(GiftError::InvalidConfigValueError {
                field: "storage.backend".to_string(),
                value: other.to_string(),
                reason: format!("Valid values: {}", STORAGE_BACKENDS.join(", ")),
            })
        }
    };
    tracing::debug!(backend = config.storage_backend(), "Opened availability store");
    Ok(store)
}

/// Presents, sells and upgrades gifts from a catalog.
pub struct GiftService<'c, S: KeyValueStore> {
    catalog: &'c Catalog,
    tracker: AvailabilityTracker<S>,
    assets: AssetResolver,
}

impl<'c, S: KeyValueStore> GiftService<'c, S> {
    pub fn new(catalog: &'c Catalog, tracker: AvailabilityTracker<S>, assets: AssetResolver) -> Self {
        Self {
            catalog,
            tracker,
            assets,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn tracker(&self) -> &AvailabilityTracker<S> {
        &self.tracker
    }

    /// Current remaining supply; `None` for unlimited gifts.
    pub fn availability(&self, id: &str) -> Result<Option<u32>> {
        let definition = self.catalog.require_definition(id)?;
        Ok(self.tracker.get_availability(definition))
    }

    pub fn present(&self, id: &str, level: u32) -> Result<GiftInstance> {
        let definition = self.catalog.require_definition(id)?;
        let level = get_level(definition, level)?;
        let availability = self.tracker.get_availability(definition);
        Ok(build_instance(definition, level, availability))
    }

    /// Sells one unit and returns the level-1 gift with the post-purchase
    /// availability snapshot.
    pub fn purchase(&self, id: &str) -> Result<GiftInstance> {
        let definition = self.catalog.require_definition(id)?;
        let first = get_level(definition, 1)?;

        if self.tracker.get_availability(definition) == Some(0) {
            tracing::info!(gift = %id, "Purchase refused, gift is sold out");
            return Err(GiftError::SoldOut { id: id.to_string() });
        }

        let remaining = self.tracker.decrease_availability(definition);
        tracing::info!(gift = %id, ?remaining, "Gift purchased");
        Ok(build_instance(definition, first, remaining))
    }

    /// Moves an owned gift one level up. The input instance is left as is.
    pub fn upgrade(&self, instance: &GiftInstance) -> Result<GiftInstance> {
        let definition = self
            .catalog
            .require_definition(&instance.metadata.definition_id)?;
        let next = get_next_level(definition, instance.metadata.level).ok_or_else(|| {
            GiftError::MaxLevelReached {
                id: definition.id.clone(),
                level: instance.metadata.level,
            }
        })?;

        let upgraded = clone_for_level(self.catalog, instance, next)?;
        tracing::info!(
            gift = %definition.id,
            from = instance.metadata.level,
            to = upgraded.metadata.level,
            cost = ?instance.upgrade_stars,
            "Gift upgraded"
        );
        Ok(upgraded)
    }

    pub fn media_url(&self, instance: &GiftInstance) -> Result<Url> {
        self.assets.resolve(&instance.media_ref)
    }
}

impl<S: KeyValueStore> GiftService<'static, S> {
    pub fn with_builtin_catalog(store: S) -> Self {
        Self::new(
            Catalog::builtin(),
            AvailabilityTracker::new(store),
            AssetResolver::default(),
        )
    }
}

impl GiftService<'static, Box<dyn KeyValueStore>> {
    /// Wires the builtin catalog to the store and assets named by `config`.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let store = open_store(config)?;
        let assets =
            AssetResolver::new(config.asset_base_url())?.with_overrides(config.asset_overrides())?;
        Ok(Self::new(
            Catalog::builtin(),
            AvailabilityTracker::with_prefix(store, config.key_prefix()),
            assets,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::domain::model::{GiftDefinition, GiftLevel};

    fn tiny_catalog() -> Catalog {
        Catalog::new(vec![GiftDefinition {
            id: "gift-pin".to_string(),
            base_price: 3,
            total_supply: Some(2),
            levels: vec![
                GiftLevel {
                    level: 1,
                    title: "Pin".to_string(),
                    media_ref: "Pin".to_string(),
                    upgrade_cost: Some(7),
                },
                GiftLevel {
                    level: 2,
                    title: "Golden Pin".to_string(),
                    media_ref: "GoldenPin".to_string(),
                    upgrade_cost: None,
                },
            ],
        }])
        .unwrap()
    }

    #[test]
    fn test_purchase_until_sold_out() {
        let catalog = tiny_catalog();
        let service = GiftService::new(
            &catalog,
            AvailabilityTracker::new(MemoryStore::new()),
            AssetResolver::default(),
        );

        assert_eq!(service.purchase("gift-pin").unwrap().remaining(), Some(1));
        let last = service.purchase("gift-pin").unwrap();
        assert_eq!(last.remaining(), Some(0));
        assert!(last.is_sold_out());
        assert!(matches!(
            service.purchase("gift-pin"),
            Err(GiftError::SoldOut { .. })
        ));
        assert_eq!(service.availability("gift-pin").unwrap(), Some(0));
    }

    #[test]
    fn test_upgrade_stops_at_max_level() {
        let catalog = tiny_catalog();
        let service = GiftService::new(
            &catalog,
            AvailabilityTracker::new(MemoryStore::new()),
            AssetResolver::default(),
        );

        let bought = service.purchase("gift-pin").unwrap();
        let golden = service.upgrade(&bought).unwrap();
        assert_eq!(golden.metadata.level, 2);
        assert_eq!(golden.stars, 10);
        assert_eq!(golden.remaining(), Some(1));
        assert_eq!(bought.metadata.level, 1);

        assert!(matches!(
            service.upgrade(&golden),
            Err(GiftError::MaxLevelReached { level: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_ids_and_levels() {
        let service = GiftService::with_builtin_catalog(MemoryStore::new());
        assert!(matches!(
            service.present("gift-nope", 1),
            Err(GiftError::DefinitionNotFound { .. })
        ));
        assert!(matches!(
            service.present("gift-sweets", 7),
            Err(GiftError::LevelNotFound { level: 7, .. })
        ));
        assert!(service.purchase("gift-nope").is_err());
    }

    #[test]
    fn test_media_url() {
        let service = GiftService::with_builtin_catalog(MemoryStore::new());
        let rocket = service.present("gift-space", 1).unwrap();
        assert_eq!(
            service.media_url(&rocket).unwrap().as_str(),
            "https://assets.gift-catalog.local/tgs/Rocket.tgs"
        );
    }
}
