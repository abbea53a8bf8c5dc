//! Localized strings for exported documents and user notices.
//!
//! A [`Translations`] value is built once for the active [`Language`] and
//! passed explicitly to whatever renders text; switching language means
//! building a new value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::model::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Ja,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Es, Language::Ja];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Ja => "ja",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Language::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Unknown or missing codes resolve to English.
    pub fn resolve(code: Option<&str>) -> Self {
        code.and_then(Language::from_code).unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLabels {
    pub number: &'static str,
    pub sku: &'static str,
    pub product: &'static str,
    pub category: &'static str,
    pub unit_price: &'static str,
    pub quantity: &'static str,
    pub total: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    pub language: Language,
    pub order_title: &'static str,
    pub date: &'static str,
    pub customer: &'static str,
    pub email: &'static str,
    pub company_name: &'static str,
    pub company_address: &'static str,
    pub comments: &'static str,
    pub page: &'static str,
    pub table: TableLabels,
    pub fallback_notice: &'static str,
    pub no_products: &'static str,
    pub export_success: &'static str,
    pub order_success: &'static str,
    pub empty_cart: &'static str,
}

impl Translations {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Es => Self {
                language,
                order_title: "Pedido de Suministros",
                date: "Fecha",
                customer: "Cliente",
                email: "Correo Electrónico",
                company_name: "Nombre de la Empresa",
                company_address: "Dirección de la Empresa",
                comments: "Comentarios",
                page: "Página",
                table: TableLabels {
                    number: "#",
                    sku: "SKU",
                    product: "Producto",
                    category: "Categoría",
                    unit_price: "Precio Unitario",
                    quantity: "Cantidad",
                    total: "Total",
                },
                fallback_notice:
                    "No se pudieron cargar los productos desde el CSV. Usando datos de respaldo.",
                no_products: "No se encontraron productos",
                export_success: "Catálogo exportado",
                order_success: "Pedido generado",
                empty_cart: "El carrito está vacío",
            },
            Language::Ja => Self {
                language,
                order_title: "供給注文",
                date: "日付",
                customer: "お客様",
                email: "メール",
                company_name: "会社名",
                company_address: "会社住所",
                comments: "コメント",
                page: "ページ",
                table: TableLabels {
                    number: "#",
                    sku: "SKU",
                    product: "製品",
                    category: "カテゴリー",
                    unit_price: "単価",
                    quantity: "数量",
                    total: "合計",
                },
                fallback_notice: "CSVから製品データを読み込めませんでした。予備データを使用します。",
                no_products: "製品が見つかりません",
                export_success: "カタログをエクスポートしました",
                order_success: "注文書を作成しました",
                empty_cart: "カートは空です",
            },
            Language::En => Self {
                language,
                order_title: "Supply Order",
                date: "Date",
                customer: "Customer",
                email: "Email",
                company_name: "Company Name",
                company_address: "Company Address",
                comments: "Comments",
                page: "Page",
                table: TableLabels {
                    number: "#",
                    sku: "SKU",
                    product: "Product",
                    category: "Category",
                    unit_price: "Unit Price",
                    quantity: "Quantity",
                    total: "Total",
                },
                fallback_notice: "Could not load product data from CSV. Using fallback data.",
                no_products: "No products found",
                export_success: "Catalog exported",
                order_success: "Order generated",
                empty_cart: "Your cart is empty",
            },
        }
    }

    /// Lookup by raw code; anything unrecognized gets English.
    pub fn for_code(code: &str) -> Self {
        Self::for_language(Language::resolve(Some(code)))
    }

    pub fn category_name(&self, category: Category) -> &'static str {
        match (self.language, category) {
            (Language::En, Category::Cups) => "Cups",
            (Language::En, Category::Flavors) => "Flavors",
            (Language::En, Category::Consumables) => "Consumables",
            (Language::En, Category::Other) => "Other",
            (Language::Es, Category::Cups) => "Tazas",
            (Language::Es, Category::Flavors) => "Sabores",
            (Language::Es, Category::Consumables) => "Consumibles",
            (Language::Es, Category::Other) => "Otros",
            (Language::Ja, Category::Cups) => "カップ",
            (Language::Ja, Category::Flavors) => "フレーバー",
            (Language::Ja, Category::Consumables) => "消耗品",
            (Language::Ja, Category::Other) => "その他",
        }
    }

    /// Title with the brand in front (`KONEXA Supply Order`).
    pub fn branded_title(&self, brand: &str) -> String {
        if brand.trim().is_empty() {
            self.order_title.to_string()
        } else {
            format!("{} {}", brand.trim(), self.order_title)
        }
    }

    pub fn format_date(&self, date: chrono::NaiveDate) -> String {
        match self.language {
            Language::En => date.format("%-m/%-d/%Y").to_string(),
            Language::Es => date.format("%-d/%-m/%Y").to_string(),
            Language::Ja => date.format("%Y/%-m/%-d").to_string(),
        }
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::for_language(Language::En)
    }
}
