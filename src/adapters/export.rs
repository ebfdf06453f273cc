use crate::core::catalog::Catalog;
use crate::core::valuation::calculate_invested_stars;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct CatalogRow<'a> {
    gift_id: &'a str,
    base_price: u64,
    total_supply: Option<u32>,
    level: u32,
    title: &'a str,
    media_ref: &'a str,
    upgrade_cost: Option<u64>,
    invested_stars: u64,
}

/// Writes one CSV row per (gift, level) pair, in catalog order.
pub fn write_catalog_csv<W: Write>(catalog: &Catalog, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for definition in catalog.definitions() {
        for level in &definition.levels {
            csv_writer.serialize(CatalogRow {
                gift_id: &definition.id,
                base_price: definition.base_price,
                total_supply: definition.total_supply,
                level: level.level,
                title: &level.title,
                media_ref: &level.media_ref,
                upgrade_cost: level.upgrade_cost,
                invested_stars: calculate_invested_stars(definition, level.level),
            })?;
            rows += 1;
        }
    }

    csv_writer.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_builtin_catalog() {
        let mut buffer = Vec::new();
        let rows = write_catalog_csv(Catalog::builtin(), &mut buffer).unwrap();
        assert_eq!(rows, 16);

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "gift_id,base_price,total_supply,level,title,media_ref,upgrade_cost,invested_stars"
        );
        assert!(text.contains("gift-sweets,5,,3,🍰 Pastry,MousseCake,50,40"));
        assert!(text.contains("gift-space,60,500,4,💎 Artifact,ArtisanBrick,,960"));
        assert_eq!(text.lines().count(), 17);
    }
}
