//! HTTP client for a curator's landing page and its recommendations feed.

mod fetch_all;

use std::time::Duration;

use curdump_core::CuratorInfo;
use reqwest::Client;

use crate::curator_info::parse_curator_info;
use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::{ClientSettings, FilteredEndpoint, FilteredPage};
use crate::urls::{curator_page_url, resolve_curator_base};

pub use fetch_all::{ProgressFn, MAX_PAGES};

/// Path segment appended to a curator's base URL to reach the paginated feed.
pub const FILTERED_ENDPOINT_SUFFIX: &str = "ajaxgetfilteredrecommendations/";

/// HTTP client for one store origin.
///
/// Throttling (429), not-found (404), and other non-2xx responses surface as
/// typed errors. Transient failures (429, 5xx, network errors) are retried
/// with exponential backoff up to `max_retries` additional attempts.
pub struct CuratorClient {
    pub(super) client: Client,
    pub(super) store_url: String,
    pub(super) accept_language: String,
    pub(super) max_retries: u32,
    pub(super) backoff_base_secs: u64,
}

impl CuratorClient {
    /// Creates a client for the store origin named in `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(settings: &ClientSettings) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            store_url: settings.store_url.trim_end_matches('/').to_owned(),
            accept_language: settings.accept_language.clone(),
            max_retries: settings.max_retries,
            backoff_base_secs: settings.backoff_base_secs,
        })
    }

    /// Like [`Self::new`], but pointed at `store_url` instead of the
    /// configured origin. Used against local mock servers.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn with_store_url(settings: &ClientSettings, store_url: &str) -> Result<Self, ScraperError> {
        let mut client = Self::new(settings)?;
        client.store_url = store_url.trim_end_matches('/').to_owned();
        Ok(client)
    }

    #[must_use]
    pub fn store_url(&self) -> &str {
        &self.store_url
    }

    /// Landing page URL for `curator_id` under this client's origin.
    #[must_use]
    pub fn curator_page_url(&self, curator_id: u64) -> String {
        curator_page_url(&self.store_url, curator_id)
    }

    /// Fetches the raw landing page HTML for `curator_id`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] on HTTP 429 after retries run out.
    /// - [`ScraperError::NotFound`] on HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure.
    pub async fn fetch_curator_page(&self, curator_id: u64) -> Result<String, ScraperError> {
        let url = self.curator_page_url(curator_id);
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, &self.accept_language)
                    .send()
                    .await?;
                let response = check_status(response, &url)?;
                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Scrapes name and follower count from the landing page.
    ///
    /// Never fails: when the page cannot be fetched the returned info carries
    /// only the id and landing URL.
    pub async fn fetch_curator_info(&self, curator_id: u64) -> CuratorInfo {
        let page_url = self.curator_page_url(curator_id);
        match self.fetch_curator_page(curator_id).await {
            Ok(html) => parse_curator_info(&html, curator_id, &page_url),
            Err(e) => {
                tracing::warn!(curator_id, error = %e, "curator info fetch failed — using bare info");
                CuratorInfo::bare(curator_id, page_url)
            }
        }
    }

    /// Resolves the paginated feed endpoint for `curator_id` from its
    /// landing page.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_curator_page`].
    pub async fn resolve_filtered_url(
        &self,
        curator_id: u64,
    ) -> Result<FilteredEndpoint, ScraperError> {
        let referer = self.curator_page_url(curator_id);
        let html = self.fetch_curator_page(curator_id).await?;
        let base = resolve_curator_base(&html, &referer);
        tracing::debug!(curator_id, base = %base, "resolved curator base endpoint");
        Ok(FilteredEndpoint {
            filtered_url: format!("{base}{FILTERED_ENDPOINT_SUFFIX}"),
            referer,
        })
    }

    /// Fetches one page of `count` recommendations starting at offset `start`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if the endpoint URL does not parse.
    /// - [`ScraperError::RateLimited`], [`ScraperError::NotFound`],
    ///   [`ScraperError::UnexpectedStatus`], [`ScraperError::Http`] as for
    ///   [`Self::fetch_curator_page`].
    /// - [`ScraperError::Deserialize`] if the body is not the JSON envelope.
    pub async fn fetch_filtered_page(
        &self,
        endpoint: &FilteredEndpoint,
        start: u64,
        count: u32,
        sort: &str,
    ) -> Result<FilteredPage, ScraperError> {
        let url = Self::filtered_page_url(&endpoint.filtered_url, start, count, sort)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "*/*")
                    .header(reqwest::header::ACCEPT_LANGUAGE, &self.accept_language)
                    .header(reqwest::header::REFERER, &endpoint.referer)
                    .header("X-Requested-With", "XMLHttpRequest")
                    .send()
                    .await?;
                let response = check_status(response, &url)?;
                let body = response.text().await?;
                serde_json::from_str::<FilteredPage>(&body).map_err(|e| {
                    ScraperError::Deserialize {
                        context: format!("recommendations page at start={start}"),
                        source: e,
                    }
                })
            }
        })
        .await
    }

    /// Reads the feed's advertised total with a single-item request.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_filtered_page`].
    pub async fn fetch_total_count(
        &self,
        endpoint: &FilteredEndpoint,
        sort: &str,
    ) -> Result<u64, ScraperError> {
        let page = self.fetch_filtered_page(endpoint, 0, 1, sort).await?;
        Ok(page.total_count)
    }

    /// Builds the feed URL with the full query the store's own page sends.
    fn filtered_page_url(
        filtered_url: &str,
        start: u64,
        count: u32,
        sort: &str,
    ) -> Result<String, ScraperError> {
        let mut url = reqwest::Url::parse(filtered_url).map_err(|e| ScraperError::InvalidUrl {
            url: filtered_url.to_owned(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("query", "")
            .append_pair("start", &start.to_string())
            .append_pair("count", &count.to_string())
            .append_pair("dynamic_data", "")
            .append_pair("tagids", "")
            .append_pair("sort", sort)
            .append_pair("app_types", "")
            .append_pair("curations", "")
            .append_pair("reset", "false");

        Ok(url.to_string())
    }
}

/// Maps non-2xx responses to typed errors.
fn check_status(
    response: reqwest::Response,
    url: &str,
) -> Result<reqwest::Response, ScraperError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(ScraperError::RateLimited {
            domain: host_of(url),
            retry_after_secs,
        });
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ScraperError::NotFound {
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response)
}

fn host_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
