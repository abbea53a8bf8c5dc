use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn csv_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn file_prefix(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
    fn backfill_prices(&self) -> bool;
}

/// Where the raw catalog CSV comes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_text(&self) -> Result<String>;

    fn describe(&self) -> String;
}
