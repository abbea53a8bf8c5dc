pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{http::HttpCatalogSource, preferences::PreferenceStore, storage::LocalStorage};
pub use app::session::{ExportSettings, OrderForm, Session};
pub use config::AppConfig;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use core::catalog::{CatalogLoad, CatalogLoader, CatalogOrigin};
pub use core::i18n::{Language, Translations};
pub use utils::error::{PickerError, Result};
