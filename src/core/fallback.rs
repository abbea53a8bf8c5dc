use crate::domain::model::{CatalogItem, Category};

pub const DEFAULT_CSV_URL: &str = "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/Pedido%20Juan%20Valdez%20%20Supplies%20-%20Osaka%20Expo%202025%20-%20Abril%2011%202025-76ZNTLGgSPrq0mlQ5vtxV4F3Dgsn1A.csv";

const FALLBACK_ROWS: &[(&str, &str, &str, f64, &str, Category)] = &[
    (
        "Salsa Torani De Chocolate Y Moca Pura Elaborada 468g",
        "トラーニ チョコレート モカソース ピュアメイド 468g",
        "¥4,003",
        4003.0,
        "SATO-001",
        Category::Flavors,
    ),
    (
        "Torani Salsa De Chocolate Y Mocha 1890ml",
        "東洋ベバレッジ トラーニ チョコレートモカソース 1890ml",
        "¥6,696",
        6696.0,
        "TOSA-002",
        Category::Flavors,
    ),
    (
        "Vaso Frio Tapa Plana 10 Oz (1000 units)",
        "コールドカップ フラットリッド 10オンス (1000個)",
        "¥16,500",
        16500.0,
        "VAFR-003",
        Category::Cups,
    ),
    (
        "Vaso Frio Tapa Domo 10 Oz (1000 units)",
        "コールドカップ ドームリッド 10オンス (1000個)",
        "¥19,800",
        19800.0,
        "VAFR-004",
        Category::Cups,
    ),
    (
        "Tapa Vaso Caliente 12 Oz (1000 units)",
        "ホットカップリッド 12オンス (1000個)",
        "¥11,880",
        11880.0,
        "TAVA-005",
        Category::Cups,
    ),
    (
        "Vaso Caliente Blanco 8 Oz (1000 units)",
        "ホットカップ ホワイト 8オンス (1000個)",
        "¥21,120",
        21120.0,
        "VACA-006",
        Category::Cups,
    ),
];

/// Static catalog used when the remote CSV cannot be loaded.
pub fn fallback_catalog() -> Vec<CatalogItem> {
    FALLBACK_ROWS
        .iter()
        .enumerate()
        .map(|(i, (name, original, price, value, sku, category))| {
            let mut item = CatalogItem::new((i + 1).to_string(), *name);
            item.original_name = original.to_string();
            item.current_price = price.to_string();
            item.price_value = *value;
            item.sku = sku.to_string();
            item.category = *category;
            item
        })
        .collect()
}
