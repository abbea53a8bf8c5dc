use chrono::NaiveDate;

use crate::adapters::preferences::PreferenceStore;
use crate::app::export::{
    cart_csv_filename, csv_filename, generate_order, pdf_filename, to_csv, ExportGuard,
    PdfOptions, DEFAULT_FILE_PREFIX,
};
use crate::core::cart::Cart;
use crate::core::catalog::CatalogLoad;
use crate::core::i18n::{Language, Translations};
use crate::core::view::{apply, DisplayOrder, ViewQuery};
use crate::domain::model::{CatalogItem, OrderSubmission};
use crate::domain::ports::Storage;
use crate::utils::error::{PickerError, Result};
use crate::utils::validation::{require_field, validate_email};

/// Order form fields as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct OrderForm {
    pub customer_name: String,
    pub customer_email: String,
    pub company_name: String,
    pub company_address: String,
    pub comments: String,
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub file_prefix: String,
    pub pdf: PdfOptions,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            pdf: PdfOptions::default(),
        }
    }
}

/// One user's working state: the loaded catalog, the current view over it,
/// and the cart. Nothing here is shared between sessions.
pub struct Session {
    catalog: Vec<CatalogItem>,
    notice: Option<String>,
    query: ViewQuery,
    view: Vec<CatalogItem>,
    display_order: DisplayOrder,
    cart: Cart,
    translations: Translations,
    settings: ExportSettings,
    export_guard: ExportGuard,
}

impl Session {
    pub fn new(load: CatalogLoad, translations: Translations, settings: ExportSettings) -> Self {
        let mut session = Self {
            catalog: load.items,
            notice: load.notice,
            query: ViewQuery::default(),
            view: Vec::new(),
            display_order: DisplayOrder::default(),
            cart: Cart::new(),
            translations,
            settings,
            export_guard: ExportGuard::new(),
        };
        session.recompute();
        session
    }

    fn recompute(&mut self) {
        self.view = apply(&self.catalog, &self.query);
        self.display_order = DisplayOrder::identity(self.view.len());
    }

    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    /// Replaces the view query and recomputes the view; any manual
    /// reordering is discarded.
    pub fn set_query(&mut self, query: ViewQuery) {
        self.query = query;
        self.recompute();
    }

    /// Current view in display order.
    pub fn visible_items(&self) -> Vec<&CatalogItem> {
        self.display_order.arrange(&self.view)
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        self.display_order.move_item(from, to)
    }

    pub fn find_item(&self, key: &str) -> Option<&CatalogItem> {
        let key = key.trim();
        self.catalog
            .iter()
            .find(|item| item.id == key || item.sku.eq_ignore_ascii_case(key))
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds by id or SKU. Returns false when nothing matches.
    pub fn add_to_cart(&mut self, key: &str, quantity: u32) -> bool {
        let Some(item) = self.find_item(key).cloned() else {
            tracing::warn!("No catalog item matches '{}'", key);
            return false;
        };
        self.cart.add(&item, quantity);
        tracing::debug!("Cart: {} x{} ({} entries)", item.sku, quantity, self.cart.len());
        true
    }

    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) {
        self.cart.set_quantity(item_id, quantity);
    }

    pub fn remove_from_cart(&mut self, item_id: &str) {
        self.cart.remove(item_id);
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn set_language(&mut self, language: Language) {
        self.translations = Translations::for_language(language);
    }

    /// Switches language and persists it as the saved preference.
    pub async fn change_language<S: Storage>(
        &mut self,
        language: Language,
        store: &PreferenceStore<S>,
    ) -> Result<()> {
        self.set_language(language);
        store.save_language(language).await
    }

    /// Validates the form against the cart. Name and email are required and
    /// the cart must not be empty.
    pub fn build_submission(&self, form: &OrderForm) -> Result<OrderSubmission> {
        if self.cart.is_empty() {
            return Err(PickerError::ValidationError {
                message: self.translations.empty_cart.to_string(),
            });
        }
        require_field("name", &form.customer_name)?;
        validate_email("email", &form.customer_email)?;

        Ok(OrderSubmission {
            customer_name: form.customer_name.trim().to_string(),
            customer_email: form.customer_email.trim().to_string(),
            company_name: form.company_name.trim().to_string(),
            company_address: form.company_address.trim().to_string(),
            comments: form.comments.trim().to_string(),
            entries: self.cart.entries().to_vec(),
        })
    }

    /// Writes the order PDF and returns its file name.
    pub async fn submit_order<S: Storage>(
        &self,
        form: &OrderForm,
        storage: &S,
        date: NaiveDate,
    ) -> Result<String> {
        let submission = self.build_submission(form)?;
        let _token = self.export_guard.try_begin()?;

        let document = generate_order(&submission, &self.translations, &self.settings.pdf, date)
            .map_err(|e| {
                tracing::error!("PDF generation error: {}", e);
                e
            })?;

        let filename = pdf_filename(&self.settings.file_prefix, date);
        storage.write_file(&filename, &document.bytes).await?;
        tracing::info!(
            "🧾 {}: {} ({} pages)",
            self.translations.order_success,
            filename,
            document.page_count
        );
        Ok(filename)
    }

    /// Writes the whole catalog (not just the current view) as CSV.
    pub async fn export_catalog_csv<S: Storage>(&self, storage: &S, date: NaiveDate) -> Result<String> {
        let filename = csv_filename(&self.settings.file_prefix, date);
        self.write_csv(&self.catalog, filename, storage).await
    }

    pub async fn export_cart_csv<S: Storage>(&self, storage: &S, date: NaiveDate) -> Result<String> {
        let items: Vec<CatalogItem> = self.cart.entries().iter().map(|e| e.item.clone()).collect();
        let filename = cart_csv_filename(&self.settings.file_prefix, date);
        self.write_csv(&items, filename, storage).await
    }

    async fn write_csv<S: Storage>(
        &self,
        items: &[CatalogItem],
        filename: String,
        storage: &S,
    ) -> Result<String> {
        let _token = self.export_guard.try_begin()?;

        let csv = to_csv(items)?;
        storage.write_file(&filename, csv.as_bytes()).await?;
        tracing::info!("📄 {}: {} ({} rows)", self.translations.export_success, filename, items.len());
        Ok(filename)
    }
}
