use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::FetchError;

/// Path of the branch search endpoint, relative to the API base URL.
const SEARCH_PATH: &str = "/api/v2/branches/search";

/// HTTP client for the Cornershop branch search endpoint.
///
/// Issues exactly one GET per [`CornershopClient::search`] call. There is no
/// retry, backoff or pagination; non-2xx responses and unparseable bodies
/// are returned as typed errors. Any pacing between calls is the caller's
/// job (see [`crate::Throttle`]).
pub struct CornershopClient {
    client: Client,
    base_url: String,
}

impl CornershopClient {
    /// Creates a client for `base_url` (scheme and host, e.g.
    /// `https://cornershopapp.com`) with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Searches every branch near `postal_code` for `query` and returns the
    /// parsed JSON body.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidPostalCode`] / [`FetchError::InvalidCountry`] —
    ///   checked before any request is sent.
    /// - [`FetchError::InvalidUrl`] — the configured base URL cannot be parsed.
    /// - [`FetchError::Http`] — network or TLS failure.
    /// - [`FetchError::UnexpectedStatus`] — any non-2xx status.
    /// - [`FetchError::InvalidJson`] — the body is not valid JSON.
    pub async fn search(
        &self,
        query: &str,
        postal_code: &str,
        country: &str,
    ) -> Result<Value, FetchError> {
        let postal_code = normalize_postal_code(postal_code)?;
        let country = normalize_country(country)?;
        let url = self.search_url(query, &postal_code, &country)?;

        tracing::info!(query, postal_code = %postal_code, country = %country, "searching branches");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "search request failed");
            FetchError::Http(e)
        })?;
        let status = response.status();

        if !status.is_success() {
            tracing::error!(url = %url, status = status.as_u16(), "search returned error status");
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<Value>(&body).map_err(|e| {
            tracing::error!(url = %url, error = %e, "search returned invalid JSON");
            FetchError::InvalidJson { url, source: e }
        })
    }

    /// Builds the search URL with URL-encoded query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the base URL cannot be parsed.
    fn search_url(&self, query: &str, postal_code: &str, country: &str) -> Result<String, FetchError> {
        let base = format!("{}{SEARCH_PATH}", self.base_url);
        let mut url = reqwest::Url::parse(&base).map_err(|e| FetchError::InvalidUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("locality", postal_code)
            .append_pair("country", country);

        Ok(url.to_string())
    }
}

/// Validates a two-letter country code and returns it uppercased.
///
/// # Errors
///
/// Returns [`FetchError::InvalidCountry`] for anything other than exactly
/// two ASCII letters (surrounding whitespace is ignored).
pub fn normalize_country(country: &str) -> Result<String, FetchError> {
    cornershop_core::normalize_country(country)
        .ok_or_else(|| FetchError::InvalidCountry(country.to_owned()))
}

/// Validates a digits-only postal code, keeping leading zeros.
///
/// # Errors
///
/// Returns [`FetchError::InvalidPostalCode`] for an empty code or one with
/// any non-digit character.
pub fn normalize_postal_code(postal_code: &str) -> Result<String, FetchError> {
    cornershop_core::normalize_postal_code(postal_code)
        .ok_or_else(|| FetchError::InvalidPostalCode(postal_code.to_owned()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
