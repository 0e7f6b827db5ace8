//! HTTP client for the public training-offer search endpoint.

mod fetch_all;

use std::time::Duration;

use offerscan_core::{AppConfig, SearchParameters};
use reqwest::{Client, Url};

use crate::error::{PageFetchError, SearchError};
use crate::types::SearchPage;

pub use fetch_all::{FetchBudget, FetchOutcome, PageFailure};

/// Listings per page. The endpoint accepts larger values but silently caps
/// them, which would break the page arithmetic.
pub const PAGE_SIZE: u32 = 20;

/// Upper bound on pages fetched per run. Guards against a corrupt
/// `totalPages` turning one run into thousands of requests.
pub(crate) const MAX_PAGES: u32 = 500;

/// Everything needed to build an [`OfferClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub api_key: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_concurrent_pages: usize,
    pub accept_invalid_certs: bool,
}

impl ClientSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            user_agent: config.user_agent.clone(),
            timeout_secs: config.request_timeout_secs,
            max_concurrent_pages: config.max_concurrent_pages,
            accept_invalid_certs: config.accept_invalid_certs,
        }
    }
}

/// Client for the training-offer search endpoint.
///
/// Every request carries the identifying `User-Agent` and `X-API-Key`
/// headers the endpoint expects. Failures are returned as typed
/// [`PageFetchError`]s and are never retried.
pub struct OfferClient {
    client: Client,
    base_url: Url,
    api_key: String,
    max_concurrent_pages: usize,
}

impl OfferClient {
    /// Creates a client from the given settings.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    /// - [`SearchError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(settings: &ClientSettings) -> Result<Self, SearchError> {
        let base_url =
            Url::parse(&settings.base_url).map_err(|e| SearchError::InvalidBaseUrl {
                base_url: settings.base_url.clone(),
                reason: e.to_string(),
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&settings.user_agent)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: settings.api_key.clone(),
            max_concurrent_pages: settings.max_concurrent_pages.max(1),
        })
    }

    /// Fetches one page (0-based) of search results.
    ///
    /// # Errors
    ///
    /// - [`PageFetchError::Timeout`] if the request exceeded the client timeout.
    /// - [`PageFetchError::Transport`] on any other network or TLS failure.
    /// - [`PageFetchError::Status`] on a non-2xx response.
    /// - [`PageFetchError::Decode`] if the body is not a search envelope.
    pub async fn fetch_page(
        &self,
        page: u32,
        params: &SearchParameters,
    ) -> Result<SearchPage, PageFetchError> {
        let url = self.page_url(page, params);

        let response = self
            .client
            .get(url)
            .header("X-API-Key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| PageFetchError::from_transport(page, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageFetchError::Status {
                page,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| PageFetchError::from_transport(page, e))?;

        serde_json::from_str::<SearchPage>(&body)
            .map_err(|source| PageFetchError::Decode { page, source })
    }

    /// Builds the request URL for one page with percent-encoded query
    /// parameters.
    fn page_url(&self, page: u32, params: &SearchParameters) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("size", &PAGE_SIZE.to_string())
            .append_pair("ort", params.location())
            .append_pair("uk", &params.radius_km().to_string())
            .append_pair("ids", &params.job_category_id().to_string())
            .append_pair("bart", &params.offer_type_code().to_string());
        url
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
