use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid JSON response from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid country code \"{0}\": expected two ASCII letters")]
    InvalidCountry(String),

    #[error("invalid postal code \"{0}\": expected digits only")]
    InvalidPostalCode(String),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidUrl { base_url: String, reason: String },
}

impl FetchError {
    /// `true` for failures that happened before or during transport, as
    /// opposed to a response that arrived but could not be used.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Http(_))
    }
}
