use crate::domain::model::{GiftDefinition, GiftLevel};
use crate::utils::error::{GiftError, Result};
use crate::utils::validation::validate_gift_id;
use std::collections::HashSet;
use std::sync::LazyLock;

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(builtin_definitions()).expect("builtin gift definitions must be valid")
});

fn level(level: u32, title: &str, media_ref: &str, upgrade_cost: Option<u64>) -> GiftLevel {
    GiftLevel {
        level,
        title: title.to_string(),
        media_ref: media_ref.to_string(),
        upgrade_cost,
    }
}

/// The gifts shipped with the client.
pub fn builtin_definitions() -> Vec<GiftDefinition> {
    vec![
        GiftDefinition {
            id: "gift-sweets".to_string(),
            base_price: 5,
            total_supply: None,
            levels: vec![
                level(1, "🍭 Candy", "WhipCupcake", Some(10)),
                level(2, "🍬 Lollipop", "IceCream", Some(25)),
                level(3, "🍰 Pastry", "MousseCake", Some(50)),
                level(4, "🎂 Cake", "Cake", None),
            ],
        },
        GiftDefinition {
            id: "gift-flowers".to_string(),
            base_price: 25,
            total_supply: Some(1000),
            levels: vec![
                level(1, "🌹 Rose", "Rose", Some(35)),
                level(2, "💐 Bouquet", "Bouquet", Some(60)),
                level(3, "🌺 Spring Basket", "SpringBasket", Some(120)),
                level(4, "🏆 Trophy", "Champion", None),
            ],
        },
        GiftDefinition {
            id: "gift-tech".to_string(),
            base_price: 40,
            total_supply: None,
            levels: vec![
                level(1, "🔧 Gadget", "InputKey", Some(80)),
                level(2, "⚔️ Light Sword", "LightSword", Some(160)),
                level(3, "🛡️ Heroic Helmet", "HeroicHelmet", Some(250)),
                level(4, "💪 Cyber Armor", "MightyArm", None),
            ],
        },
        GiftDefinition {
            id: "gift-space".to_string(),
            base_price: 60,
            total_supply: Some(500),
            levels: vec![
                level(1, "🚀 Rocket", "Rocket", Some(150)),
                level(2, "🛰️ Star Shuttle", "StellarRocket", Some(300)),
                level(3, "🌙 Moon Charm", "MoonPendant", Some(450)),
                level(4, "💎 Artifact", "ArtisanBrick", None),
            ],
        },
    ]
}

/// Immutable set of gift definitions.
///
/// There is no way to add, remove or edit a definition once a catalog has
/// been built.
#[derive(Debug, Clone)]
pub struct Catalog {
    definitions: Vec<GiftDefinition>,
}

impl Catalog {
    /// Builds a catalog after checking the level and supply invariants of
    /// every definition.
    pub fn new(definitions: Vec<GiftDefinition>) -> Result<Self> {
        {
            let mut seen = HashSet::new();
            for definition in &definitions {
                validate_definition(definition)?;
                if !seen.insert(definition.id.as_str()) {
                    return Err(GiftError::InvalidDefinition {
                        id: definition.id.clone(),
                        reason: "duplicate id".to_string(),
                    });
                }
            }
        }
        Ok(Self { definitions })
    }

    /// Process-wide catalog, initialised on first use.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn definitions(&self) -> impl Iterator<Item = &GiftDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn is_known_id(&self, id: &str) -> bool {
        self.definitions.iter().any(|definition| definition.id == id)
    }

    pub fn get_definition(&self, id: &str) -> Option<&GiftDefinition> {
        self.definitions.iter().find(|definition| definition.id == id)
    }

    /// Like [`Catalog::get_definition`], but treats a miss as an invariant violation.
    pub fn require_definition(&self, id: &str) -> Result<&GiftDefinition> {
        self.get_definition(id)
            .ok_or_else(|| GiftError::DefinitionNotFound { id: id.to_string() })
    }
}

pub fn get_level(definition: &GiftDefinition, level: u32) -> Result<&GiftLevel> {
    definition
        .levels
        .iter()
        .find(|item| item.level == level)
        .ok_or_else(|| GiftError::LevelNotFound {
            definition_id: definition.id.clone(),
            level,
        })
}

pub fn get_next_level(definition: &GiftDefinition, level: u32) -> Option<&GiftLevel> {
    let next = level.checked_add(1)?;
    definition.levels.iter().find(|item| item.level == next)
}

fn validate_definition(definition: &GiftDefinition) -> Result<()> {
    let invalid = |reason: String| GiftError::InvalidDefinition {
        id: definition.id.clone(),
        reason,
    };

    validate_gift_id(&definition.id)?;

    if definition.total_supply == Some(0) {
        return Err(invalid("total supply must be positive".to_string()));
    }
    if definition.levels.is_empty() {
        return Err(invalid("at least one level is required".to_string()));
    }

    let last = definition.levels.len() - 1;
    for (index, item) in definition.levels.iter().enumerate() {
        let expected = index as u32 + 1;
        if item.level != expected {
            return Err(invalid(format!(
                "level {} found where level {} was expected",
                item.level, expected
            )));
        }
        match (index == last, item.upgrade_cost) {
            (true, Some(_)) => {
                return Err(invalid(format!("final level {} has an upgrade cost", item.level)))
            }
            (false, None) => {
                return Err(invalid(format!("level {} is missing its upgrade cost", item.level)))
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level(id: &str) -> GiftDefinition {
        GiftDefinition {
            id: id.to_string(),
            base_price: 1,
            total_supply: None,
            levels: vec![
                level(1, "One", "A", Some(2)),
                level(2, "Two", "B", None),
            ],
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::new(builtin_definitions()).unwrap();
        assert_eq!(catalog.len(), 4);

        let builtin = Catalog::builtin();
        assert_eq!(builtin.len(), 4);
        for definition in builtin.definitions() {
            assert!(validate_definition(definition).is_ok());
        }
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::builtin();
        assert!(catalog.is_known_id("gift-flowers"));
        assert!(!catalog.is_known_id("gift-flower"));
        assert!(catalog.get_definition("GIFT-FLOWERS").is_none());
        assert_eq!(
            catalog.get_definition("gift-space").unwrap().total_supply,
            Some(500)
        );
    }

    #[test]
    fn test_get_level_bounds() {
        let definition = Catalog::builtin().get_definition("gift-tech").unwrap();
        for n in 1..=4 {
            assert_eq!(get_level(definition, n).unwrap().level, n);
        }
        assert!(matches!(
            get_level(definition, 0),
            Err(GiftError::LevelNotFound { level: 0, .. })
        ));
        assert!(matches!(
            get_level(definition, 5),
            Err(GiftError::LevelNotFound { level: 5, .. })
        ));
    }

    #[test]
    fn test_get_next_level() {
        let definition = Catalog::builtin().get_definition("gift-sweets").unwrap();
        assert_eq!(get_next_level(definition, 1).unwrap().upgrade_cost, Some(25));
        assert!(get_next_level(definition, 4).is_none());
        assert!(get_next_level(definition, u32::MAX).is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![two_level("dup"), two_level("dup")]);
        assert!(matches!(result, Err(GiftError::InvalidDefinition { .. })));
    }

    #[test]
    fn test_rejects_gaps_and_misplaced_costs() {
        let mut gap = two_level("gap");
        gap.levels[1].level = 3;
        assert!(Catalog::new(vec![gap]).is_err());

        let mut trailing = two_level("trailing");
        trailing.levels[1].upgrade_cost = Some(5);
        assert!(Catalog::new(vec![trailing]).is_err());

        let mut missing = two_level("missing");
        missing.levels[0].upgrade_cost = None;
        assert!(Catalog::new(vec![missing]).is_err());

        let mut empty = two_level("empty");
        empty.levels.clear();
        assert!(Catalog::new(vec![empty]).is_err());

        let mut zero_supply = two_level("zero");
        zero_supply.total_supply = Some(0);
        assert!(Catalog::new(vec![zero_supply]).is_err());
    }
}
