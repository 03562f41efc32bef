mod batch;
mod pipeline;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use cornershop_core::{ExportFormat, HttpConfig};
use cornershop_scraper::{CornershopClient, Throttle};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cornershop-cli")]
#[command(about = "Fetch Cornershop product prices and export them to disk")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search one term and export the flattened results.
    Fetch(FetchArgs),
    /// Search every term of a term list, writing one snapshot per term.
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
struct FetchArgs {
    /// Product to search for.
    #[arg(long)]
    query: String,
    /// Postal code of the delivery area (digits only).
    #[arg(long, visible_alias = "cep", env = "CS_CODE", value_parser = parse_postal_code)]
    postal_code: String,
    /// Two-letter country code, e.g. `BR`.
    #[arg(long, env = "CS_COUNTRY", value_parser = parse_country)]
    country: String,
    /// Directory the export is written to (created if missing).
    #[arg(long, visible_alias = "dir-path")]
    output_dir: PathBuf,
    /// File name prefix; a timestamp and extension are appended.
    #[arg(long)]
    base_name: String,
    /// Output format: csv, parquet or json.
    #[arg(long)]
    format: ExportFormat,
    /// Seconds to wait before issuing the request.
    #[arg(long, default_value_t = 0)]
    delay_secs: u64,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Term list YAML file (overrides `CS_TERMS_PATH`).
    #[arg(long)]
    terms: Option<PathBuf>,
    /// Continue with the remaining terms after a failure.
    #[arg(long)]
    keep_going: bool,
    /// Seconds to wait before each request (overrides `CS_DELAY_SECS`).
    #[arg(long)]
    delay_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let http = cornershop_core::load_http_config()?;
    let client = build_client(&http)?;

    match cli.command {
        Commands::Fetch(args) => {
            let request = pipeline::FetchRequest {
                query: args.query,
                postal_code: args.postal_code,
                country: args.country,
                output_dir: args.output_dir,
                base_name: args.base_name,
                format: args.format,
            };
            let throttle = Throttle::from_secs(args.delay_secs);
            if pipeline::run_fetch(&client, throttle, &request)
                .await?
                .is_none()
            {
                tracing::warn!("no data returned; nothing exported");
            }
        }
        Commands::Batch(args) => {
            let mut config = cornershop_core::load_batch_config()?;
            if let Some(path) = args.terms {
                config.terms_path = path;
            }
            if let Some(secs) = args.delay_secs {
                config.delay_secs = secs;
            }
            config.continue_on_error |= args.keep_going;

            let terms = cornershop_core::load_terms(&config.terms_path)?.terms();
            let summary = batch::run_batch(&client, &config, &terms).await?;
            if !summary.failed.is_empty() {
                anyhow::bail!(
                    "{} of {} terms failed: {}",
                    summary.failed.len(),
                    terms.len(),
                    summary.failed.join(", ")
                );
            }
        }
    }

    Ok(())
}

fn parse_postal_code(raw: &str) -> Result<String, String> {
    cornershop_core::normalize_postal_code(raw)
        .ok_or_else(|| format!("expected digits only, got \"{raw}\""))
}

fn parse_country(raw: &str) -> Result<String, String> {
    cornershop_core::normalize_country(raw)
        .ok_or_else(|| format!("expected a two-letter country code, got \"{raw}\""))
}

/// Installs the `fmt` subscriber. `RUST_LOG` wins over `CS_LOG_LEVEL`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("CS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        EnvFilter::new(level)
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_client(http: &HttpConfig) -> anyhow::Result<CornershopClient> {
    CornershopClient::new(&http.base_url, http.request_timeout_secs, &http.user_agent)
        .context("failed to build HTTP client")
}
