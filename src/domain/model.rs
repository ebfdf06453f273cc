use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftLevel {
    /// 1-based position in the upgrade progression.
    pub level: u32,
    pub title: String,
    /// Symbolic animated-asset name, resolved by [`crate::adapters::assets::AssetResolver`].
    pub media_ref: String,
    /// Cost to move from this level to the next one; `None` on the last level.
    pub upgrade_cost: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftDefinition {
    pub id: String,
    pub base_price: u64,
    /// `None` means unlimited supply.
    pub total_supply: Option<u32>,
    pub levels: Vec<GiftLevel>,
}

impl GiftDefinition {
    pub fn is_limited(&self) -> bool {
        self.total_supply.is_some()
    }

    pub fn max_level(&self) -> u32 {
        self.levels.len() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitedInfo {
    pub total: u32,
    /// Availability snapshot taken when the instance was built, if any.
    pub remaining: Option<u32>,
    pub sold_out: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    pub id: String,
    pub set_short_name: String,
    pub is_lottie: bool,
    pub is_video: bool,
    pub media_ref: String,
}

/// Everything needed to rebuild an instance at another level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftMetadata {
    pub definition_id: String,
    pub level: u32,
    pub levels: Vec<GiftLevel>,
    pub max_level: u32,
}

/// A gift as presented to, or owned by, a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftInstance {
    pub id: String,
    pub title: String,
    pub media_ref: String,
    pub sticker: Sticker,
    pub stars: u64,
    pub stars_to_convert: u64,
    pub limited: Option<LimitedInfo>,
    pub upgrade_stars: Option<u64>,
    pub metadata: GiftMetadata,
}

impl GiftInstance {
    pub fn is_sold_out(&self) -> bool {
        self.limited.as_ref().is_some_and(|info| info.sold_out)
    }

    pub fn remaining(&self) -> Option<u32> {
        self.limited.as_ref().and_then(|info| info.remaining)
    }

    pub fn is_max_level(&self) -> bool {
        self.metadata.level >= self.metadata.max_level
    }
}
