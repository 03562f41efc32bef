//! Batch mode: run the pipeline over a term list.
//!
//! Terms are processed one at a time with the configured fixed delay
//! before each search. Whether a failed term aborts the run is decided by
//! [`BatchConfig::continue_on_error`]; failures are never dropped silently.

use cornershop_core::BatchConfig;
use cornershop_scraper::{CornershopClient, Throttle};

use crate::pipeline::fetch_records;

/// Per-run tallies, logged when the batch finishes.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    pub succeeded: usize,
    /// Terms whose response had no `results` list; no file is written.
    pub skipped: usize,
    pub failed: Vec<String>,
    pub records: usize,
}

/// Processes every term in order.
///
/// # Errors
///
/// With `continue_on_error` unset, the first failing term aborts the run
/// and its error is returned. Otherwise failures are collected in
/// [`BatchSummary::failed`] and the run completes.
pub(crate) async fn run_batch(
    client: &CornershopClient,
    config: &BatchConfig,
    terms: &[String],
) -> anyhow::Result<BatchSummary> {
    let throttle = Throttle::from_secs(config.delay_secs);
    let mut summary = BatchSummary::default();

    tracing::info!(
        terms = terms.len(),
        postal_code = %config.postal_code,
        country = %config.country,
        delay_secs = config.delay_secs,
        "starting batch run"
    );

    for term in terms {
        match process_term(client, throttle, config, term).await {
            Ok(Some(count)) => {
                summary.succeeded += 1;
                summary.records += count;
            }
            Ok(None) => summary.skipped += 1,
            Err(e) => {
                let detail = format!("{e:#}");
                tracing::error!(term = %term, error = %detail, "term failed");
                if !config.continue_on_error {
                    return Err(e.context(format!("batch aborted at term \"{term}\"")));
                }
                summary.failed.push(term.clone());
            }
        }
    }

    tracing::info!(
        succeeded = summary.succeeded,
        skipped = summary.skipped,
        failed = summary.failed.len(),
        records = summary.records,
        "batch run complete"
    );

    Ok(summary)
}

/// Fetches, flattens and saves one term. Returns the record count, or
/// `None` when there was nothing to save.
async fn process_term(
    client: &CornershopClient,
    throttle: Throttle,
    config: &BatchConfig,
    term: &str,
) -> anyhow::Result<Option<usize>> {
    let Some(records) =
        fetch_records(client, throttle, term, &config.postal_code, &config.country).await?
    else {
        return Ok(None);
    };

    cornershop_export::save_batch_snapshot(&records, &config.base_dir, term, &config.postal_code)?;
    Ok(Some(records.len()))
}
