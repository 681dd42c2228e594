//! HTTP client for the portfolio backend.
//!
//! The optimized fetch asks for the whole aggregate in one request. Backends
//! that only serve per-section documents answer that with 404, in which case
//! the sections are fetched concurrently and assembled locally.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{PortfolioData, Section};

use super::{PortfolioService, ServiceError};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Maximum concurrent per-section requests on the fallback path.
const MAX_CONCURRENT_SECTION_REQUESTS: usize = 4;

/// Portfolio backend client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpPortfolioService {
    client: Client,
    base_url: String,
}

impl HttpPortfolioService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn aggregate_url(&self) -> String {
        format!("{}/portfolio", self.base_url)
    }

    fn section_url(&self, section: Section) -> String {
        format!("{}/portfolio/{}", self.base_url, section.key())
    }

    /// GET request for a portfolio document; the locale goes through the
    /// query encoder.
    fn request(&self, url: &str, locale: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .query(&[("locale", locale)])
            .header(header::ACCEPT, "application/json")
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(None) for rate limit (should retry).
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>, ServiceError> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ServiceError::from_status(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str, locale: &str) -> Result<T, ServiceError> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self.request(url, locale).send().await?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    let text = response.text().await?;
                    return serde_json::from_str(&text).map_err(|e| {
                        ServiceError::InvalidResponse(format!("Failed to parse {}: {}", url, e))
                    });
                }
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ServiceError::RateLimited);
                    }
                    warn!(url = url, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2;
                }
            }
        }
    }

    /// Fetch every section separately and assemble the aggregate.
    pub async fn fetch_portfolio(&self, locale: &str) -> Result<PortfolioData, ServiceError> {
        let results: Vec<(Section, Result<serde_json::Value, ServiceError>)> =
            stream::iter(Section::ALL)
                .map(|section| {
                    let url = self.section_url(section);
                    async move { (section, self.get::<serde_json::Value>(&url, locale).await) }
                })
                .buffer_unordered(MAX_CONCURRENT_SECTION_REQUESTS)
                .collect()
                .await;

        let mut parts = Vec::with_capacity(results.len());
        for (section, result) in results {
            match result {
                Ok(value) => parts.push((section, value)),
                // Contact is optional; other sections are not
                Err(ServiceError::NotFound(_)) if section == Section::Contact => {
                    debug!("No contact section on backend");
                }
                Err(e) => return Err(e),
            }
        }

        assemble_sections(parts)
    }
}

/// Build an aggregate from per-section JSON documents.
pub(crate) fn assemble_sections(
    parts: Vec<(Section, serde_json::Value)>,
) -> Result<PortfolioData, ServiceError> {
    let mut map = serde_json::Map::new();
    for (section, value) in parts {
        map.insert(section.key().to_string(), value);
    }
    serde_json::from_value(serde_json::Value::Object(map))
        .map_err(|e| ServiceError::InvalidResponse(format!("Failed to assemble portfolio: {}", e)))
}

#[async_trait]
impl PortfolioService for HttpPortfolioService {
    async fn fetch_portfolio_optimized(&self, locale: &str) -> Result<PortfolioData, ServiceError> {
        let url = self.aggregate_url();
        match self.get::<PortfolioData>(&url, locale).await {
            Err(ServiceError::NotFound(_)) => {
                debug!(locale = locale, "Aggregate endpoint missing, fetching per section");
                self.fetch_portfolio(locale).await
            }
            other => other,
        }
    }
}
