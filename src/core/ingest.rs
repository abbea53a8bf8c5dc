use crate::core::categorize::categorize;
use crate::core::sku::generate_sku;
use crate::domain::model::CatalogItem;
use crate::domain::ports::CatalogSource;
use crate::utils::money::parse_price;

const MIN_FIELDS_PER_ROW: usize = 3;

/// Columns the ingester understands; anything else in the header is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    ProductName,
    OriginalName,
    CurrentPrice,
    Cantidades,
    Total,
    Notes,
}

impl Column {
    fn from_header(name: &str) -> Option<Self> {
        match name {
            "Product Name" => Some(Column::ProductName),
            "Original Name" => Some(Column::OriginalName),
            "Current Price" => Some(Column::CurrentPrice),
            "Cantidades" => Some(Column::Cantidades),
            "Total" => Some(Column::Total),
            "Notes" => Some(Column::Notes),
            _ => None,
        }
    }
}

/// Splits one CSV line on commas outside double quotes.
///
/// Every `"` toggles the quoted state and is dropped. Doubled quotes inside a
/// quoted field are not collapsed, so `"a ""b"""` yields `a b`.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}

/// Leading integer of a cell, `parseInt` style: `"12 cajas"` → 12.
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let digits_end = trimmed
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().ok()
}

/// Parses catalog CSV text into items.
///
/// Rows with fewer than three fields are skipped with a warning; rows without
/// a product name are dropped silently. Ids are the 1-based position among
/// non-blank data rows.
pub fn parse_catalog(csv_text: &str) -> Vec<CatalogItem> {
    let lines: Vec<&str> = csv_text.lines().collect();

    if lines.len() < 2 {
        tracing::error!("CSV text does not contain a header and at least one data row");
        return Vec::new();
    }

    let columns: Vec<Option<Column>> = lines[0]
        .split(',')
        .map(|header| Column::from_header(header.trim()))
        .collect();

    let mut items = Vec::new();
    let data_rows = lines
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty());

    for (position, (line_index, line)) in data_rows.enumerate() {
        let values = split_csv_line(line);

        if values.len() < MIN_FIELDS_PER_ROW {
            tracing::warn!(
                "Line {} has only {} values, skipping: {}",
                line_index + 1,
                values.len(),
                line
            );
            continue;
        }

        let index = position as u64 + 1;
        let mut item = CatalogItem::new(index.to_string(), "");

        for (column, raw) in columns.iter().zip(values.iter()) {
            let Some(column) = column else { continue };
            let value = raw.trim();

            match column {
                Column::ProductName => item.product_name = value.to_string(),
                Column::OriginalName => item.original_name = value.to_string(),
                Column::CurrentPrice => {
                    if !value.is_empty() {
                        item.current_price = value.to_string();
                        item.price_value = parse_price(value);
                    }
                }
                Column::Cantidades => item.cantidades = parse_leading_int(value),
                Column::Total => {
                    if !value.is_empty() {
                        item.total = value.to_string();
                    }
                }
                Column::Notes => {
                    item.notes = (!value.is_empty()).then(|| value.to_string());
                }
            }
        }

        if item.product_name.trim().is_empty() {
            continue;
        }

        item.sku = generate_sku(&item.product_name, index);
        item.category = categorize(&item.product_name, &item.original_name);
        items.push(item);
    }

    tracing::debug!("Parsed {} catalog items from CSV", items.len());
    items
}

/// Fetches and parses the catalog. Any fetch failure is logged and turned
/// into an empty list so the caller can fall back to static data.
pub async fn fetch_and_parse<S: CatalogSource + ?Sized>(source: &S) -> Vec<CatalogItem> {
    match source.fetch_text().await {
        Ok(text) => parse_catalog(&text),
        Err(e) => {
            tracing::error!("Error fetching catalog from {}: {}", source.describe(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;
    use crate::utils::error::{PickerError, Result};
    use async_trait::async_trait;

    const HEADER: &str = "Product Name,Original Name,Current Price,Cantidades,Total,Notes";

    #[test]
    fn test_split_respects_quotes() {
        assert_eq!(
            split_csv_line(r#"a,"b, c",d"#),
            vec!["a".to_string(), "b, c".to_string(), "d".to_string()]
        );
        assert_eq!(split_csv_line(""), vec![String::new()]);
        assert_eq!(split_csv_line("a,,b").len(), 3);
    }

    #[test]
    fn test_split_does_not_unescape_doubled_quotes() {
        assert_eq!(split_csv_line(r#""a ""b""",c"#), vec!["a b", "c"]);
    }

    #[test]
    fn test_parse_full_row() {
        let csv = format!(
            "{}\nTorani Salsa De Caramelo 1890ml,東洋ベバレッジ トラーニ キャラメルソース 1890ml,\"¥7,560\",2,\"¥15,120\",urgente\n",
            HEADER
        );
        let items = parse_catalog(&csv);

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.id, "1");
        assert_eq!(item.current_price, "¥7,560");
        assert_eq!(item.price_value, 7560.0);
        assert_eq!(item.cantidades, Some(2));
        assert_eq!(item.total, "¥15,120");
        assert_eq!(item.notes.as_deref(), Some("urgente"));
        assert_eq!(item.sku, "TOSADE-001");
        assert_eq!(item.category, Category::Flavors);
        assert!(item.in_stock);
    }

    #[test]
    fn test_missing_columns_take_defaults() {
        let csv = "Product Name,Original Name,Unknown\nPrana Chai 1kg,プラナチャイ 1kG,x\n";
        let items = parse_catalog(csv);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].current_price, "¥0");
        assert_eq!(items[0].price_value, 0.0);
        assert_eq!(items[0].total, "¥0");
        assert!(items[0].notes.is_none());
        assert!(items[0].cantidades.is_none());
    }

    #[test]
    fn test_unparseable_price_becomes_zero() {
        let csv = format!("{}\nVaso Frio,,consultar,,,\n", HEADER);
        let items = parse_catalog(&csv);
        assert_eq!(items[0].current_price, "consultar");
        assert_eq!(items[0].price_value, 0.0);
    }

    #[test]
    fn test_short_and_nameless_rows_are_skipped() {
        let csv = format!(
            "{}\nonly,two\n,Nameless,¥100,,,\n   ,Blank,¥100,,,\nPrana Chai 1kg,,¥8,,,\n",
            HEADER
        );
        let items = parse_catalog(&csv);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_name, "Prana Chai 1kg");
        // position counts every non-blank data row, including skipped ones
        assert_eq!(items[0].id, "4");
        assert_eq!(items[0].sku, "PRCH1K-004");
    }

    #[test]
    fn test_blank_lines_and_crlf_are_ignored() {
        let csv = format!("{}\r\n\r\nVaso Caliente,,¥21,,,\r\n\r\n", HEADER);
        let items = parse_catalog(&csv);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].product_name, "Vaso Caliente");
    }

    #[test]
    fn test_header_only_yields_nothing() {
        assert!(parse_catalog(HEADER).is_empty());
        assert!(parse_catalog("").is_empty());
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(parse_leading_int("12 cajas"), Some(12));
        assert_eq!(parse_leading_int("  3"), Some(3));
        assert_eq!(parse_leading_int("cajas"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        async fn fetch_text(&self) -> Result<String> {
            Err(PickerError::ProcessingError {
                message: "connection reset".to_string(),
            })
        }

        fn describe(&self) -> String {
            "failing source".to_string()
        }
    }

    #[test]
    fn test_fetch_failure_yields_empty_catalog() {
        let items = tokio_test::block_on(fetch_and_parse(&FailingSource));
        assert!(items.is_empty());
    }
}
