use std::path::PathBuf;

use crate::app_config::{BatchConfig, HttpConfig};
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://cornershopapp.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Load batch-mode configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_batch_config() -> Result<BatchConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_batch_config(|key| std::env::var(key))
}

/// Load HTTP client settings from environment variables, falling back to
/// the public API defaults.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if `CS_REQUEST_TIMEOUT_SECS` is not
/// a number.
pub fn load_http_config() -> Result<HttpConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_http_config(|key| std::env::var(key))
}

fn parse_u64<F>(lookup: &F, var: &str, default: &str) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Build HTTP settings using the provided env-var lookup function.
pub(crate) fn build_http_config<F>(lookup: F) -> Result<HttpConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let base_url = or_default("CS_BASE_URL", DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    let user_agent = or_default("CS_USER_AGENT", DEFAULT_USER_AGENT);
    let request_timeout_secs = parse_u64(&lookup, "CS_REQUEST_TIMEOUT_SECS", "30")?;

    Ok(HttpConfig {
        base_url,
        user_agent,
        request_timeout_secs,
    })
}

/// Build batch configuration using the provided env-var lookup function.
///
/// This is the parsing/validation logic, decoupled from the process
/// environment so it can be tested with a `HashMap` lookup.
pub(crate) fn build_batch_config<F>(lookup: F) -> Result<BatchConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let base_dir = PathBuf::from(require("CS_DIRECTORY")?);

    let raw_code = require("CS_CODE")?;
    let postal_code =
        crate::normalize_postal_code(&raw_code).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: "CS_CODE".to_string(),
            reason: format!("expected digits only, got \"{raw_code}\""),
        })?;

    let raw_country = require("CS_COUNTRY")?;
    let country =
        crate::normalize_country(&raw_country).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: "CS_COUNTRY".to_string(),
            reason: format!("expected a two-letter country code, got \"{raw_country}\""),
        })?;

    let terms_path = PathBuf::from(or_default("CS_TERMS_PATH", "./config/terms.yaml"));
    let delay_secs = parse_u64(&lookup, "CS_DELAY_SECS", "2")?;
    let continue_on_error = parse_bool(&or_default("CS_CONTINUE_ON_ERROR", "false"))
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            var: "CS_CONTINUE_ON_ERROR".to_string(),
            reason: "expected true/false".to_string(),
        })?;

    Ok(BatchConfig {
        base_dir,
        postal_code,
        country,
        terms_path,
        delay_secs,
        continue_on_error,
    })
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
