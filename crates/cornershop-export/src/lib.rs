//! Writers that persist flattened search results to disk.
//!
//! Output files are named `{base_name}_{YYYYMMDD-HHMMSS}.{ext}`. Batch runs
//! use [`save_batch_snapshot`], which writes a JSON array to
//! `{base_dir}/data/{term}_{code}_{YYYYMMDD_HHMMSS}.json`. Existing files
//! are never overwritten.

pub mod csv_file;
pub mod error;
pub mod json_file;
pub mod naming;
pub mod parquet_file;

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use cornershop_core::{ExportFormat, FlatRecord};

pub use csv_file::read_csv;
pub use error::ExportError;
pub use json_file::{read_json_array, read_ndjson};
pub use parquet_file::read_parquet;

/// Exports `records` to `dir` using a format selector string.
///
/// The selector is validated before any filesystem work, so an unsupported
/// format leaves `dir` untouched.
///
/// # Errors
///
/// - [`ExportError::Config`] — unsupported format selector.
/// - any error from [`export_records_at`].
pub fn export_records(
    records: &[FlatRecord],
    dir: &Path,
    base_name: &str,
    format: &str,
) -> Result<PathBuf, ExportError> {
    let format: ExportFormat = format.parse()?;
    export_records_at(
        records,
        dir,
        base_name,
        format,
        chrono::Local::now().naive_local(),
    )
}

/// Exports `records` to `dir`, naming the file after `timestamp`.
///
/// Creates `dir` (recursively) if it does not exist. Returns the path of
/// the written file.
///
/// # Errors
///
/// Returns the first I/O or serialization error, carrying the attempted
/// path. The error is logged before it is returned.
pub fn export_records_at(
    records: &[FlatRecord],
    dir: &Path,
    base_name: &str,
    format: ExportFormat,
    timestamp: NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(naming::output_file_name(base_name, format, timestamp));

    let result = ensure_dir(dir).and_then(|()| match format {
        ExportFormat::Csv => csv_file::write_csv(records, &path),
        ExportFormat::Parquet => parquet_file::write_parquet(records, &path),
        ExportFormat::Json => json_file::write_ndjson(records, &path),
    });

    match result {
        Ok(()) => {
            tracing::info!(path = %path.display(), records = records.len(), %format, "data exported");
            Ok(path)
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "export failed");
            Err(e)
        }
    }
}

/// Writes a batch-mode snapshot for one term: a JSON array of `records` at
/// `{base_dir}/data/{term}_{code}_{YYYYMMDD_HHMMSS}.json`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] or [`ExportError::Json`] with the attempted
/// path.
pub fn save_batch_snapshot(
    records: &[FlatRecord],
    base_dir: &Path,
    term: &str,
    postal_code: &str,
) -> Result<PathBuf, ExportError> {
    save_batch_snapshot_at(
        records,
        base_dir,
        term,
        postal_code,
        chrono::Local::now().naive_local(),
    )
}

/// [`save_batch_snapshot`] with an explicit timestamp.
///
/// # Errors
///
/// Same as [`save_batch_snapshot`].
pub fn save_batch_snapshot_at(
    records: &[FlatRecord],
    base_dir: &Path,
    term: &str,
    postal_code: &str,
    timestamp: NaiveDateTime,
) -> Result<PathBuf, ExportError> {
    let data_dir = base_dir.join("data");
    let path = data_dir.join(naming::batch_file_name(term, postal_code, timestamp));

    let result = ensure_dir(&data_dir).and_then(|()| json_file::write_json_array(records, &path));

    match result {
        Ok(()) => {
            tracing::info!(path = %path.display(), records = records.len(), term, "snapshot saved");
            Ok(path)
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "snapshot save failed");
            Err(e)
        }
    }
}

/// Opens `path` for writing, failing if it already exists so that a name
/// collision never truncates an earlier export.
pub(crate) fn create_new(path: &Path) -> Result<File, ExportError> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })
}

fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.to_path_buf(),
        source: e,
    })
}
