pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::TomlConfig;

pub use crate::adapters::{AssetResolver, DisabledStore, FileStore, MemoryStore};
pub use crate::core::availability::AvailabilityTracker;
pub use crate::core::catalog::{get_level, get_next_level, Catalog};
pub use crate::core::service::GiftService;
pub use crate::core::valuation::{build_instance, calculate_invested_stars, clone_for_level};
pub use crate::domain::model::{GiftDefinition, GiftInstance, GiftLevel, GiftMetadata, LimitedInfo, Sticker};
pub use crate::domain::ports::{ConfigProvider, KeyValueStore};
pub use crate::utils::error::{GiftError, Result, StorageError};
