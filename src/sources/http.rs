use std::time::Duration;

use crate::state::{CategoryNode, Product, ProductId, ProductPage, QueryDescriptor};

use super::{CatalogSource, Result};

/// What: Catalog client for the storefront REST API.
///
/// Details:
/// - One pooled `reqwest::Client` is shared by every request; clones are cheap.
/// - Non-success statuses become errors carrying the status code and path.
#[derive(Clone, Debug)]
pub struct HttpCatalog {
    /// Pooled HTTP client with the configured timeout.
    client: reqwest::Client,
    /// API base without trailing slash.
    base_url: String,
}

impl HttpCatalog {
    /// What: Create a client for the API at `base_url`.
    ///
    /// Inputs:
    /// - `base_url`: API base such as `http://localhost:8080/api`
    /// - `timeout`: Per-request timeout
    ///
    /// Output:
    /// - `Ok(HttpCatalog)`; `Err` when the HTTP client cannot be built.
    ///
    /// # Errors
    /// - Returns `Err` when TLS or client initialization fails
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .timeout(timeout)
            .user_agent(format!("vitrine/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// API base this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` and return the body of a successful response.
    async fn get_text(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Network error: {e}"))?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "catalog request failed");
            return Err(format!("HTTP {} for {url}", status.as_u16()).into());
        }
        let body = resp
            .text()
            .await
            .map_err(|e| format!("Failed to read response: {e}"))?;
        tracing::debug!(%url, bytes = body.len(), "catalog response received");
        Ok(body)
    }
}

impl CatalogSource for HttpCatalog {
    async fn fetch_page(&self, query: &QueryDescriptor) -> Result<ProductPage> {
        let url = super::page_url(&self.base_url, query);
        let body = self.get_text(&url).await?;
        super::parse_page(&body)
    }

    async fn fetch_categories(&self) -> Result<Vec<CategoryNode>> {
        let body = self.get_text(&format!("{}/categories", self.base_url)).await?;
        super::parse_categories(&body)
    }

    async fn fetch_rating(&self, id: ProductId) -> Result<f64> {
        let url = format!("{}/reviews/product/{id}/rating", self.base_url);
        let body = self.get_text(&url).await?;
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(0.0);
        }
        Ok(serde_json::from_str::<f64>(trimmed)?)
    }

    async fn fetch_max_price(&self) -> Result<Option<f64>> {
        let body = self.get_text(&format!("{}/products", self.base_url)).await?;
        let products: Vec<Product> = serde_json::from_str(&body)?;
        Ok(products
            .iter()
            .map(|p| p.price)
            .filter(|p| p.is_finite())
            .reduce(f64::max))
    }
}
