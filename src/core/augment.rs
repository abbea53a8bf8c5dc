use crate::core::sku::generate_sku;
use crate::domain::model::{CatalogItem, Category};

struct Supplement {
    product_name: &'static str,
    original_name: &'static str,
    current_price: &'static str,
    price_value: f64,
}

const SUPPLEMENTARY_ITEMS: &[Supplement] = &[
    Supplement {
        product_name: "Vaso Frio Tapa Plana 10 Oz (1000 units)",
        original_name: "コールドカップ フラットリッド 10オンス (1000個)",
        current_price: "¥16,500",
        price_value: 16500.0,
    },
    Supplement {
        product_name: "Vaso Frio Tapa Domo 10 Oz (1000 units)",
        original_name: "コールドカップ ドームリッド 10オンス (1000個)",
        current_price: "¥19,800",
        price_value: 19800.0,
    },
    Supplement {
        product_name: "Tapa Vaso Caliente 12 Oz (1000 units)",
        original_name: "ホットカップリッド 12オンス (1000個)",
        current_price: "¥11,880",
        price_value: 11880.0,
    },
    Supplement {
        product_name: "Vaso Caliente Blanco 8 Oz (1000 units)",
        original_name: "ホットカップ ホワイト 8オンス (1000個)",
        current_price: "¥21,120",
        price_value: 21120.0,
    },
];

/// Highest numeric id in the catalog; 0 when empty or when no id parses.
pub fn max_numeric_id(catalog: &[CatalogItem]) -> u64 {
    catalog
        .iter()
        .filter_map(CatalogItem::numeric_id)
        .max()
        .unwrap_or(0)
}

/// Appends the fixed cup items after `catalog`, numbering them from the
/// current maximum id so they never collide with ingested rows.
pub fn append_supplementary_items(mut catalog: Vec<CatalogItem>) -> Vec<CatalogItem> {
    let highest_id = max_numeric_id(&catalog);

    for (offset, supplement) in SUPPLEMENTARY_ITEMS.iter().enumerate() {
        let id = highest_id + 1 + offset as u64;
        let mut item = CatalogItem::new(id.to_string(), supplement.product_name);
        item.original_name = supplement.original_name.to_string();
        item.current_price = supplement.current_price.to_string();
        item.price_value = supplement.price_value;
        item.sku = generate_sku(supplement.product_name, id);
        item.category = Category::Cups;
        catalog.push(item);
    }

    tracing::debug!(
        "Appended {} supplementary items starting at id {}",
        SUPPLEMENTARY_ITEMS.len(),
        highest_id + 1
    );
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_existing_maximum() {
        let catalog = vec![CatalogItem::new("3", "A"), CatalogItem::new("10", "B")];
        let augmented = append_supplementary_items(catalog);

        assert_eq!(augmented.len(), 6);
        let ids: Vec<&str> = augmented[2..].iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["11", "12", "13", "14"]);
        assert_eq!(augmented[2].sku, "VAFRTA-011");
        assert!(augmented[2..].iter().all(|i| i.category == Category::Cups));
    }

    #[test]
    fn test_empty_catalog_starts_at_one() {
        let augmented = append_supplementary_items(Vec::new());
        let ids: Vec<&str> = augmented.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_non_numeric_ids_are_ignored() {
        let catalog = vec![CatalogItem::new("abc", "A"), CatalogItem::new("2", "B")];
        let augmented = append_supplementary_items(catalog);
        assert_eq!(augmented[2].id, "3");

        let only_text = append_supplementary_items(vec![CatalogItem::new("x", "A")]);
        assert_eq!(only_text[1].id, "1");
    }

    #[test]
    fn test_supplementary_prices() {
        let augmented = append_supplementary_items(Vec::new());
        assert_eq!(augmented[0].current_price, "¥16,500");
        assert_eq!(augmented[0].price_value, 16500.0);
        assert_eq!(augmented[3].price_value, 21120.0);
        assert_eq!(augmented[3].total, "¥0");
    }
}
