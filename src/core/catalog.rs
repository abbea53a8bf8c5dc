use crate::core::augment::append_supplementary_items;
use crate::core::fallback::fallback_catalog;
use crate::core::i18n::Translations;
use crate::core::ingest::fetch_and_parse;
use crate::core::price_book::backfill_prices;
use crate::domain::model::CatalogItem;
use crate::domain::ports::CatalogSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Remote,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub items: Vec<CatalogItem>,
    pub origin: CatalogOrigin,
    /// Non-blocking banner text when the fallback catalog is in use.
    pub notice: Option<String>,
}

pub struct CatalogLoader<S: CatalogSource> {
    source: S,
    backfill_prices: bool,
}

impl<S: CatalogSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            backfill_prices: false,
        }
    }

    pub fn with_price_backfill(mut self, enabled: bool) -> Self {
        self.backfill_prices = enabled;
        self
    }

    /// Fetch, parse and augment the catalog. Never fails: an unreachable
    /// source or a CSV with no usable rows yields the fallback catalog plus a
    /// localized notice.
    pub async fn load(&self, translations: &Translations) -> CatalogLoad {
        tracing::info!("📥 Loading catalog from {}", self.source.describe());

        let mut items: Vec<CatalogItem> = fetch_and_parse(&self.source)
            .await
            .into_iter()
            .filter(|item| !item.product_name.trim().is_empty())
            .collect();

        if items.is_empty() {
            tracing::warn!("No valid products found in CSV, using fallback data");
            return CatalogLoad {
                items: append_supplementary_items(fallback_catalog()),
                origin: CatalogOrigin::Fallback,
                notice: Some(translations.fallback_notice.to_string()),
            };
        }

        if self.backfill_prices {
            let filled = backfill_prices(&mut items);
            tracing::debug!("Backfilled prices for {} items", filled);
        }

        tracing::info!("✅ Loaded {} valid products from CSV", items.len());
        CatalogLoad {
            items: append_supplementary_items(items),
            origin: CatalogOrigin::Remote,
            notice: None,
        }
    }
}
