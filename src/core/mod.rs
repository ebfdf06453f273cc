pub mod availability;
pub mod catalog;
pub mod service;
pub mod valuation;

pub use crate::domain::model::{GiftDefinition, GiftInstance, GiftLevel};
pub use crate::domain::ports::{ConfigProvider, KeyValueStore};
pub use crate::utils::error::Result;
