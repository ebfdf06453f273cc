use crate::core::catalog::{get_next_level, Catalog};
use crate::domain::model::{
    GiftDefinition, GiftInstance, GiftLevel, GiftMetadata, LimitedInfo, Sticker,
};
use crate::utils::error::Result;

/// Base price plus every upgrade cost paid on the way to `level`.
///
/// The cost stored on level `n` is the price of moving from `n` to `n + 1`,
/// so reaching `level` pays the costs of every level below it.
pub fn calculate_invested_stars(definition: &GiftDefinition, level: u32) -> u64 {
    let base = definition.base_price;
    if level <= 1 {
        return base;
    }

    let upgrade_costs: u64 = definition
        .levels
        .iter()
        .filter(|item| item.level < level)
        .map(|item| item.upgrade_cost.unwrap_or(0))
        .sum();

    base + upgrade_costs
}

/// Stars returned when the gift is converted: 80% of the invested stars, rounded down.
pub fn stars_to_convert(invested_stars: u64) -> u64 {
    invested_stars * 4 / 5
}

/// Upgrade cost carried by the next level, `None` when there is none.
fn upgrade_stars(definition: &GiftDefinition, level: &GiftLevel) -> Option<u64> {
    get_next_level(definition, level.level).and_then(|next| next.upgrade_cost)
}

fn build_sticker(definition: &GiftDefinition, level: &GiftLevel) -> Sticker {
    Sticker {
        id: format!("{}-lvl-{}", definition.id, level.level),
        set_short_name: format!("{}-collection", definition.id),
        is_lottie: true,
        is_video: false,
        media_ref: level.media_ref.clone(),
    }
}

pub fn build_instance(
    definition: &GiftDefinition,
    level: &GiftLevel,
    availability: Option<u32>,
) -> GiftInstance {
    let stars = calculate_invested_stars(definition, level.level);
    let limited = definition.total_supply.map(|total| LimitedInfo {
        total,
        remaining: availability,
        sold_out: availability == Some(0),
    });

    GiftInstance {
        id: definition.id.clone(),
        title: level.title.clone(),
        media_ref: level.media_ref.clone(),
        sticker: build_sticker(definition, level),
        stars,
        stars_to_convert: stars_to_convert(stars),
        limited,
        upgrade_stars: upgrade_stars(definition, level),
        metadata: GiftMetadata {
            definition_id: definition.id.clone(),
            level: level.level,
            levels: definition.levels.clone(),
            max_level: definition.max_level(),
        },
    }
}

/// Rebuilds `instance` at `level` from its catalog definition.
///
/// A missing definition is an invariant violation and fails with
/// `DefinitionNotFound`.
pub fn clone_for_level(
    catalog: &Catalog,
    instance: &GiftInstance,
    level: &GiftLevel,
) -> Result<GiftInstance> {
    let definition = catalog.require_definition(&instance.metadata.definition_id)?;
    let availability = if definition.is_limited() {
        instance.remaining()
    } else {
        None
    };
    Ok(build_instance(definition, level, availability))
}
