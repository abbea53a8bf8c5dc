/// Short product code: the first two letters of up to three words,
/// uppercased, then the zero-padded index (`"Vaso Frio Tapa"`, 3 →
/// `VAFRTA-003`). Uniqueness comes from `index` alone.
pub fn generate_sku(product_name: &str, index: u64) -> String {
    let prefix: String = product_name
        .split_whitespace()
        .take(3)
        .flat_map(|word| word.chars().take(2))
        .flat_map(char::to_uppercase)
        .collect();

    format!("{}-{:03}", prefix, index)
}
