use crate::domain::model::Category;

/// Ordered lookup table; the first category with a matching keyword wins.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Cups,
        &["cup", "mug", "glass", "tumbler", "vaso", "taza", "カップ", "マグ", "グラス"],
    ),
    (
        Category::Flavors,
        &[
            "flavor",
            "syrup",
            "sauce",
            "torani",
            "saborizante",
            "sirope",
            "salsa",
            "chai",
            "chocolate",
            "caramel",
            "vanilla",
            "vainilla",
            "canela",
            "cinnamon",
            "mocha",
            "フレーバー",
            "シロップ",
            "ソース",
            "チョコレート",
            "キャラメル",
            "バニラ",
            "シナモン",
            "モカ",
            "チャイ",
        ],
    ),
    (
        Category::Consumables,
        &[
            "napkin",
            "straw",
            "servilleta",
            "pajita",
            "paper",
            "papel",
            "wrap",
            "ナプキン",
            "ストロー",
            "紙",
            "ラップ",
            "包装",
        ],
    ),
];

/// Plain substring containment over both names, lowercased. Short keywords
/// can match inside unrelated words ("chai" in "chaise"); that is accepted.
pub fn categorize(product_name: &str, original_name: &str) -> Category {
    let haystack = format!("{} {}", product_name, original_name).to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}
