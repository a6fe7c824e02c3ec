//! HTTP client for the product sources.
//!
//! Wraps `reqwest` with a per-attempt timeout and bounded retry. The
//! spreadsheet source returns rows that are normalized by
//! [`crate::normalize::products_from_sheet`]; the JSON source is either fetched
//! over HTTP or read from disk.

use std::time::Duration;

use iwv_core::{AppConfig, Product, SourceConfig};
use reqwest::{Client, Url};

use crate::error::SourceError;
use crate::normalize::{products_from_json, products_from_sheet};
use crate::retry::retry_with_backoff;
use crate::types::SheetValuesResponse;

/// Columns read from the sheet: name, unit, price, indent.
const SHEET_RANGE: &str = "A1:D";

/// Client for loading the product list from the configured source.
pub struct CatalogClient {
    client: Client,
    source: SourceConfig,
    max_attempts: u32,
    backoff_base_ms: u64,
}

impl CatalogClient {
    /// Creates a client with the given per-attempt timeout and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        source: SourceConfig,
        timeout_secs: u64,
        max_attempts: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent("iwv-catalog/0.1")
            .build()?;
        Ok(Self {
            client,
            source,
            max_attempts,
            backoff_base_ms,
        })
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        Self::new(
            config.source.clone(),
            config.request_timeout_secs,
            config.max_attempts,
            config.retry_backoff_ms,
        )
    }

    #[must_use]
    pub fn source(&self) -> &SourceConfig {
        &self.source
    }

    /// Loads the full product list from the configured source.
    ///
    /// Network requests are retried on transient errors; empty or malformed
    /// payloads fail immediately.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] / [`SourceError::UnexpectedStatus`] after all
    ///   attempts fail.
    /// - [`SourceError::Deserialize`] or [`SourceError::EmptyData`] for bad
    ///   payloads.
    /// - [`SourceError::Io`] when a local JSON file cannot be read.
    /// - [`SourceError::InvalidUrl`] when the configured URL is malformed.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, SourceError> {
        match &self.source {
            SourceConfig::Sheet {
                spreadsheet_id,
                api_key,
                sheet_name,
                base_url,
            } => {
                let url = sheet_url(base_url, spreadsheet_id, sheet_name, api_key)?;
                let context = format!("sheet {spreadsheet_id}/{sheet_name}");
                let body = self.get_text_with_retry(&url).await?;
                let response: SheetValuesResponse =
                    serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                        context: context.clone(),
                        source: e,
                    })?;
                products_from_sheet(response, &context)
            }
            SourceConfig::Json { location } if is_http(location) => {
                let url = Url::parse(location).map_err(|e| SourceError::InvalidUrl {
                    url: location.clone(),
                    reason: e.to_string(),
                })?;
                let body = self.get_text_with_retry(&url).await?;
                products_from_json(&body, location)
            }
            SourceConfig::Json { location } => {
                let body = tokio::fs::read_to_string(location)
                    .await
                    .map_err(|e| SourceError::Io {
                        path: location.clone(),
                        source: e,
                    })?;
                products_from_json(&body, location)
            }
        }
    }

    async fn get_text_with_retry(&self, url: &Url) -> Result<String, SourceError> {
        retry_with_backoff(self.max_attempts, self.backoff_base_ms, move || {
            self.get_text(url)
        })
        .await
    }

    /// Sends one GET and returns the body of a 2xx response.
    async fn get_text(&self, url: &Url) -> Result<String, SourceError> {
        tracing::debug!(url = %redact_key(url), "fetching product list");
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(strip_url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: redact_key(url),
            });
        }
        response.text().await.map_err(strip_url)
    }
}

/// Drops the request URL from a transport error; it carries the API key.
fn strip_url(e: reqwest::Error) -> SourceError {
    SourceError::Http(e.without_url())
}

/// Builds `{base}/{id}/values/{sheet}!A1:D?key={api_key}` with each path
/// segment percent-encoded.
///
/// # Errors
///
/// Returns [`SourceError::InvalidUrl`] if `base_url` cannot be parsed or
/// cannot carry path segments.
pub(crate) fn sheet_url(
    base_url: &str,
    spreadsheet_id: &str,
    sheet_name: &str,
    api_key: &str,
) -> Result<Url, SourceError> {
    let invalid = |reason: String| SourceError::InvalidUrl {
        url: base_url.to_owned(),
        reason,
    };
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let mut url = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("URL cannot be a base".to_owned()))?
        .pop_if_empty()
        .push(spreadsheet_id)
        .push("values")
        .push(&format!("{sheet_name}!{SHEET_RANGE}"));
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}

fn is_http(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// URL text safe for logs and error messages.
fn redact_key(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "[redacted]".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    if pairs.is_empty() {
        return shown.to_string();
    }
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
