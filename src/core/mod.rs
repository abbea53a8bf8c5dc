pub mod augment;
pub mod cart;
pub mod catalog;
pub mod categorize;
pub mod fallback;
pub mod i18n;
pub mod ingest;
pub mod price_book;
pub mod sku;
pub mod view;

pub use crate::domain::model::{CartEntry, CatalogItem, Category, OrderSubmission};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, Storage};
pub use crate::utils::error::Result;
