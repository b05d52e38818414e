//! HTTP client for the product search endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use shelflife_core::ProductMetadata;

use crate::error::OpenFoodError;
use crate::types::SearchResponse;

const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org/";
const SEARCH_PATH: &str = "cgi/search.pl";
/// Fields requested from the API; everything else is dropped server-side.
const SEARCH_FIELDS: &str =
    "code,product_name,brands,categories_tags,expiration_date,best_before_date,use_by_date";

/// Client for free-text product searches.
///
/// Use [`OpenFoodClient::new`] for production or
/// [`OpenFoodClient::with_base_url`] to point at a mock server in tests.
pub struct OpenFoodClient {
    client: Client,
    base_url: Url,
    page_size: u32,
}

impl OpenFoodClient {
    /// Creates a client pointed at the public product database.
    ///
    /// # Errors
    ///
    /// Returns [`OpenFoodError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, page_size: u32) -> Result<Self, OpenFoodError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent, page_size)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`OpenFoodError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`OpenFoodError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        page_size: u32,
    ) -> Result<Self, OpenFoodError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends rather than replaces
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| OpenFoodError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            page_size: page_size.max(1),
        })
    }

    /// Searches products by free-text name.
    ///
    /// Returns candidates in the order the API ranks them. A blank query
    /// returns an empty list without any request.
    ///
    /// # Errors
    ///
    /// - [`OpenFoodError::Http`] on network failure or timeout.
    /// - [`OpenFoodError::UnexpectedStatus`] on a non-2xx status.
    /// - [`OpenFoodError::Deserialize`] if the body is not the expected JSON.
    pub async fn search_products(&self, query: &str) -> Result<Vec<ProductMetadata>, OpenFoodError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.build_search_url(query)?;
        let body = self.request_text(&url).await?;
        let response: SearchResponse =
            serde_json::from_str(&body).map_err(|e| OpenFoodError::Deserialize {
                context: format!("search(query={query})"),
                source: e,
            })?;

        tracing::debug!(
            query,
            count = response.products.len(),
            "product search returned candidates"
        );

        Ok(response
            .products
            .into_iter()
            .map(ProductMetadata::from)
            .collect())
    }

    /// Builds the search URL with percent-encoded query parameters.
    fn build_search_url(&self, query: &str) -> Result<Url, OpenFoodError> {
        let mut url =
            self.base_url
                .join(SEARCH_PATH)
                .map_err(|e| OpenFoodError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        url.query_pairs_mut()
            .append_pair("search_terms", query)
            .append_pair("search_simple", "1")
            .append_pair("action", "process")
            .append_pair("json", "1")
            .append_pair("page_size", &self.page_size.to_string())
            .append_pair("fields", SEARCH_FIELDS);
        Ok(url)
    }

    async fn request_text(&self, url: &Url) -> Result<String, OpenFoodError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OpenFoodError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
