//! Shared domain types and configuration for the Cornershop price collector.

pub mod app_config;
pub mod config;
pub mod format;
pub mod locality;
pub mod records;
pub mod terms;

use thiserror::Error;

pub use app_config::{BatchConfig, HttpConfig};
pub use config::{load_batch_config, load_http_config};
pub use format::ExportFormat;
pub use locality::{normalize_country, normalize_postal_code};
pub use records::FlatRecord;
pub use terms::{load_terms, TermCategory, TermList};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported export format \"{format}\"; supported formats are: {supported}")]
    UnsupportedFormat { format: String, supported: String },

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read term list {path}: {source}")]
    TermsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse term list: {0}")]
    TermsFileParse(#[source] serde_yaml::Error),

    #[error("invalid term list: {0}")]
    InvalidTermList(String),
}
