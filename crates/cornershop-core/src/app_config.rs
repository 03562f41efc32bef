use std::path::PathBuf;

/// Settings for the HTTP client shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Scheme and host of the search API, e.g. `https://cornershopapp.com`.
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

/// Settings for a batch run over a term list.
///
/// Mirrors the `CS_*` environment variables read by
/// [`crate::config::load_batch_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Output files land in `{base_dir}/data/`.
    pub base_dir: PathBuf,
    /// Digits only, leading zeros kept.
    pub postal_code: String,
    /// Uppercased two-letter code.
    pub country: String,
    pub terms_path: PathBuf,
    /// Fixed wait before every search request.
    pub delay_secs: u64,
    /// Keep processing remaining terms after a failed one.
    pub continue_on_error: bool,
}
