use std::cmp::Ordering;
use std::str::FromStr;

use crate::domain::model::{CatalogItem, Category};
use crate::utils::error::PickerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityFilter {
    #[default]
    All,
    InStock,
    OutOfStock,
}

impl FromStr for AvailabilityFilter {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(AvailabilityFilter::All),
            "in-stock" => Ok(AvailabilityFilter::InStock),
            "out-of-stock" => Ok(AvailabilityFilter::OutOfStock),
            other => Err(PickerError::ValidationError {
                message: format!("Unknown availability filter: {}", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl FromStr for SortOrder {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name-asc" => Ok(SortOrder::NameAsc),
            "name-desc" => Ok(SortOrder::NameDesc),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            other => Err(PickerError::ValidationError {
                message: format!("Unknown sort order: {}", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub availability: AvailabilityFilter,
    pub sort: SortOrder,
}

impl ViewQuery {
    fn matches(&self, item: &CatalogItem, needle: &str) -> bool {
        let search_hit = needle.is_empty()
            || item.product_name.to_lowercase().contains(needle)
            || item.original_name.to_lowercase().contains(needle);

        let category_hit = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == category,
        };

        search_hit && category_hit
    }
}

/// Folds case and common Latin accents so "Azúcar" sorts next to "Azucar".
fn collation_key(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Derives the display list from the full catalog. Pure: the same inputs
/// always give the same output and the catalog is never touched.
pub fn apply(catalog: &[CatalogItem], query: &ViewQuery) -> Vec<CatalogItem> {
    // Every item is modeled as in stock, so out-of-stock always shows nothing.
    if query.availability == AvailabilityFilter::OutOfStock {
        return Vec::new();
    }

    let needle = query.search.to_lowercase();
    let mut result: Vec<CatalogItem> = catalog
        .iter()
        .filter(|item| query.matches(item, &needle))
        .cloned()
        .collect();

    match query.sort {
        SortOrder::NameAsc => result.sort_by(|a, b| compare_names(&a.product_name, &b.product_name)),
        SortOrder::NameDesc => result.sort_by(|a, b| compare_names(&b.product_name, &a.product_name)),
        SortOrder::PriceAsc => result.sort_by(|a, b| a.price_value.total_cmp(&b.price_value)),
        SortOrder::PriceDesc => result.sort_by(|a, b| b.price_value.total_cmp(&a.price_value)),
    }

    result
}

/// User-arranged order over the current view, as indices into it.
/// Rebuilt from scratch whenever the view is recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOrder {
    indices: Vec<usize>,
}

impl DisplayOrder {
    pub fn identity(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Moves the entry at display position `from` to position `to`.
    /// Out-of-range positions leave the order unchanged and return false.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.indices.len() || to >= self.indices.len() {
            return false;
        }
        let index = self.indices.remove(from);
        self.indices.insert(to, index);
        true
    }

    pub fn arrange<'a>(&self, view: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
        self.indices.iter().filter_map(|&i| view.get(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, original: &str, price: f64, category: Category) -> CatalogItem {
        let mut item = CatalogItem::new(id, name);
        item.original_name = original.to_string();
        item.price_value = price;
        item.category = category;
        item
    }

    fn sample() -> Vec<CatalogItem> {
        vec![
            item("1", "Vaso Frio", "コールドカップ", 16500.0, Category::Cups),
            item("2", "Torani Caramelo", "トラーニ キャラメル", 7560.0, Category::Flavors),
            item("3", "Azúcar moreno", "ブラウンシュガー", 9423.0, Category::Other),
            item("4", "Pajitas", "ストロー", 1739.0, Category::Consumables),
        ]
    }

    fn names(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.product_name.as_str()).collect()
    }

    #[test]
    fn test_search_matches_either_name_case_insensitively() {
        let catalog = sample();
        let query = ViewQuery {
            search: "torani".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&apply(&catalog, &query)), vec!["Torani Caramelo"]);

        let query = ViewQuery {
            search: "ストロー".to_string(),
            ..Default::default()
        };
        assert_eq!(names(&apply(&catalog, &query)), vec!["Pajitas"]);
    }

    #[test]
    fn test_empty_search_matches_all() {
        assert_eq!(apply(&sample(), &ViewQuery::default()).len(), 4);
    }

    #[test]
    fn test_category_filter() {
        let query = ViewQuery {
            category: CategoryFilter::Only(Category::Cups),
            ..Default::default()
        };
        assert_eq!(names(&apply(&sample(), &query)), vec!["Vaso Frio"]);
    }

    #[test]
    fn test_name_sort_folds_accents() {
        let result = apply(&sample(), &ViewQuery::default());
        assert_eq!(
            names(&result),
            vec!["Azúcar moreno", "Pajitas", "Torani Caramelo", "Vaso Frio"]
        );

        let query = ViewQuery {
            sort: SortOrder::NameDesc,
            ..Default::default()
        };
        assert_eq!(names(&apply(&sample(), &query))[0], "Vaso Frio");
    }

    #[test]
    fn test_price_sorts() {
        let query = ViewQuery {
            sort: SortOrder::PriceAsc,
            ..Default::default()
        };
        assert_eq!(names(&apply(&sample(), &query))[0], "Pajitas");

        let query = ViewQuery {
            sort: SortOrder::PriceDesc,
            ..Default::default()
        };
        assert_eq!(names(&apply(&sample(), &query))[0], "Vaso Frio");
    }

    #[test]
    fn test_in_stock_passes_everything() {
        let query = ViewQuery {
            availability: AvailabilityFilter::InStock,
            ..Default::default()
        };
        assert_eq!(apply(&sample(), &query).len(), 4);
    }

    #[test]
    fn test_out_of_stock_is_always_empty() {
        // Known oddity: no item is ever modeled as out of stock, and the
        // filter empties the view instead of checking `in_stock`.
        let mut catalog = sample();
        catalog[0].in_stock = false;
        let query = ViewQuery {
            availability: AvailabilityFilter::OutOfStock,
            ..Default::default()
        };
        assert!(apply(&catalog, &query).is_empty());
    }

    #[test]
    fn test_apply_is_idempotent_and_pure() {
        let catalog = sample();
        let query = ViewQuery {
            search: "a".to_string(),
            sort: SortOrder::PriceDesc,
            ..Default::default()
        };
        let first = apply(&catalog, &query);
        assert_eq!(first, apply(&catalog, &query));
        assert_eq!(catalog, sample());
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "flavors".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Flavors)
        );
        assert!("drinks".parse::<CategoryFilter>().is_err());
        assert_eq!(
            "out-of-stock".parse::<AvailabilityFilter>().unwrap(),
            AvailabilityFilter::OutOfStock
        );
        assert_eq!("price-desc".parse::<SortOrder>().unwrap(), SortOrder::PriceDesc);
        assert!("newest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_display_order_moves_within_view() {
        let view = apply(&sample(), &ViewQuery::default());
        let mut order = DisplayOrder::identity(view.len());

        assert!(order.move_item(3, 0));
        let arranged: Vec<&str> = order
            .arrange(&view)
            .iter()
            .map(|i| i.product_name.as_str())
            .collect();
        assert_eq!(
            arranged,
            vec!["Vaso Frio", "Azúcar moreno", "Pajitas", "Torani Caramelo"]
        );

        assert!(!order.move_item(9, 0));
        assert_eq!(order.len(), 4);
    }
}
