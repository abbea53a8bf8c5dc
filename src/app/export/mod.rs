pub mod csv_export;
pub mod pdf_export;

pub use csv_export::to_csv;
pub use pdf_export::{generate_order, OrderDocument, PdfOptions};

use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::utils::error::{PickerError, Result};

pub const DEFAULT_FILE_PREFIX: &str = "konexa";

/// Busy flag that rejects a second export while one is running.
#[derive(Debug, Default)]
pub struct ExportGuard {
    busy: AtomicBool,
}

/// Held for the duration of one export; clears the flag when dropped.
#[derive(Debug)]
pub struct ExportToken<'a> {
    guard: &'a ExportGuard,
}

impl ExportGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> Result<ExportToken<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ExportToken { guard: self })
            .map_err(|_| PickerError::ExportBusy)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for ExportToken<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

fn dated_filename(prefix: &str, kind: &str, date: NaiveDate, extension: &str) -> String {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        format!("{}-{}.{}", kind, date.format("%Y-%m-%d"), extension)
    } else {
        format!("{}-{}-{}.{}", prefix, kind, date.format("%Y-%m-%d"), extension)
    }
}

/// `konexa-products-2025-04-11.csv`
pub fn csv_filename(prefix: &str, date: NaiveDate) -> String {
    dated_filename(prefix, "products", date, "csv")
}

/// `konexa-cart-2025-04-11.csv`
pub fn cart_csv_filename(prefix: &str, date: NaiveDate) -> String {
    dated_filename(prefix, "cart", date, "csv")
}

/// `konexa-order-2025-04-11.pdf`
pub fn pdf_filename(prefix: &str, date: NaiveDate) -> String {
    dated_filename(prefix, "order", date, "pdf")
}
