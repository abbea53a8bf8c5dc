use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::{PickerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches the catalog CSV with a single GET, no retries.
pub struct HttpCatalogSource {
    url: String,
    client: Client,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.csv_url(),
            Duration::from_secs(config.request_timeout_seconds()),
        )
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_text(&self) -> Result<String> {
        tracing::debug!("Making CSV request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("CSV response status: {}", status);

        if !status.is_success() {
            return Err(PickerError::ProcessingError {
                message: format!(
                    "Failed to fetch CSV: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                ),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_text_returns_body() {
        let server = MockServer::start();
        let csv_mock = server.mock(|when, then| {
            when.method(GET).path("/catalog.csv");
            then.status(200)
                .header("Content-Type", "text/csv; charset=utf-8")
                .body("Product Name,Original Name,Current Price\nVaso,,¥1\n");
        });

        let source =
            HttpCatalogSource::new(server.url("/catalog.csv"), Duration::from_secs(5)).unwrap();
        let text = source.fetch_text().await.unwrap();

        csv_mock.assert();
        assert!(text.starts_with("Product Name"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start();
        let csv_mock = server.mock(|when, then| {
            when.method(GET).path("/missing.csv");
            then.status(404);
        });

        let source =
            HttpCatalogSource::new(server.url("/missing.csv"), Duration::from_secs(5)).unwrap();
        let err = source.fetch_text().await.unwrap_err();

        csv_mock.assert();
        assert!(matches!(err, PickerError::ProcessingError { message } if message.contains("404")));
    }
}
