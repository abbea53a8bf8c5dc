use crate::domain::model::CatalogItem;
use crate::utils::error::{PickerError, Result};

pub const CSV_HEADERS: [&str; 8] = [
    "ID",
    "Product Name",
    "Original Name",
    "Current Price",
    "Price Value",
    "SKU",
    "Category",
    "Notes",
];

/// Serializes items as CSV with the fixed eight-column header. Fields are
/// quoted only when they contain a comma, quote or line break; every row,
/// the last included, ends with `\n`.
pub fn to_csv(items: &[CatalogItem]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;

    for item in items {
        let price_value = item.price_value.to_string();
        writer.write_record([
            item.id.as_str(),
            item.product_name.as_str(),
            item.original_name.as_str(),
            item.current_price.as_str(),
            price_value.as_str(),
            item.sku.as_str(),
            item.category.as_tag(),
            item.notes.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| PickerError::ProcessingError {
        message: format!("Failed to flush CSV writer: {}", e),
    })?;

    String::from_utf8(bytes).map_err(|e| PickerError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;

    fn cup() -> CatalogItem {
        let mut item = CatalogItem::new("3", "Vaso Frio Tapa Plana 10 Oz (1000 units)");
        item.original_name = "コールドカップ フラットリッド".to_string();
        item.current_price = "¥16,500".to_string();
        item.price_value = 16500.0;
        item.sku = "VAFRTA-003".to_string();
        item.category = Category::Cups;
        item
    }

    #[test]
    fn test_header_only_for_empty_list() {
        assert_eq!(
            to_csv(&[]).unwrap(),
            "ID,Product Name,Original Name,Current Price,Price Value,SKU,Category,Notes\n"
        );
    }

    #[test]
    fn test_row_layout() {
        let csv = to_csv(&[cup()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[1],
            "3,Vaso Frio Tapa Plana 10 Oz (1000 units),コールドカップ フラットリッド,\"¥16,500\",16500,VAFRTA-003,cups,"
        );
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_text_fields_are_escaped() {
        let mut item = cup();
        item.product_name = "Servilletas, 6 pliegues".to_string();
        item.notes = Some("dice \"urgente\"\nsegunda línea".to_string());

        let csv = to_csv(&[item]).unwrap();
        assert!(csv.contains("\"Servilletas, 6 pliegues\""));
        assert!(csv.contains("\"dice \"\"urgente\"\"\nsegunda línea\""));
    }

    #[test]
    fn test_output_reads_back_with_a_standard_reader() {
        let mut item = cup();
        item.notes = Some("a, \"b\"".to_string());

        let csv = to_csv(&[item.clone()]).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let record = reader.records().next().unwrap().unwrap();

        assert_eq!(&record[1], item.product_name);
        assert_eq!(&record[3], "¥16,500");
        assert_eq!(&record[7], "a, \"b\"");
    }
}
