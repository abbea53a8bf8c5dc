use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::PickerError;

/// Closed set of product categories, in keyword-lookup precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cups,
    Flavors,
    Consumables,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Cups,
        Category::Flavors,
        Category::Consumables,
        Category::Other,
    ];

    pub fn as_tag(&self) -> &'static str {
        match self {
            Category::Cups => "cups",
            Category::Flavors => "flavors",
            Category::Consumables => "consumables",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Category {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_tag() == s.trim())
            .ok_or_else(|| PickerError::ValidationError {
                message: format!("Unknown category: {}", s),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub product_name: String,
    pub original_name: String,
    pub current_price: String,
    pub price_value: f64,
    pub cantidades: Option<i64>,
    pub total: String,
    pub notes: Option<String>,
    pub sku: String,
    pub category: Category,
    pub in_stock: bool,
}

impl CatalogItem {
    /// Row with every optional column at its default.
    pub fn new(id: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            product_name: product_name.into(),
            original_name: String::new(),
            current_price: "¥0".to_string(),
            price_value: 0.0,
            cantidades: None,
            total: "¥0".to_string(),
            notes: None,
            sku: String::new(),
            category: Category::Other,
            in_stock: true,
        }
    }

    pub fn numeric_id(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartEntry {
    pub item: CatalogItem,
    pub quantity: u32,
}

impl CartEntry {
    pub fn line_total(&self) -> f64 {
        self.item.price_value * f64::from(self.quantity)
    }
}

/// Export-time snapshot of the order form plus the cart contents.
#[derive(Debug, Clone, Default)]
pub struct OrderSubmission {
    pub customer_name: String,
    pub customer_email: String,
    pub company_name: String,
    pub company_address: String,
    pub comments: String,
    pub entries: Vec<CartEntry>,
}

impl OrderSubmission {
    pub fn grand_total(&self) -> f64 {
        self.entries.iter().map(CartEntry::line_total).sum()
    }
}
