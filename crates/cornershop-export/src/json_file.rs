use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use cornershop_core::FlatRecord;

use crate::error::ExportError;

fn io_err(path: &Path) -> impl Fn(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_err(path: &Path) -> impl Fn(serde_json::Error) -> ExportError + '_ {
    move |source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes one JSON object per line to a new file.
///
/// # Errors
///
/// Returns [`ExportError::Io`] or [`ExportError::Json`] carrying `path`.
pub fn write_ndjson(records: &[FlatRecord], path: &Path) -> Result<(), ExportError> {
    let file = crate::create_new(path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record).map_err(json_err(path))?;
        writer.write_all(b"\n").map_err(io_err(path))?;
    }

    writer.flush().map_err(io_err(path))
}

/// Reads a newline-delimited JSON file. Blank lines are skipped.
///
/// # Errors
///
/// Returns [`ExportError::Io`] or [`ExportError::Json`] carrying `path`.
pub fn read_ndjson(path: &Path) -> Result<Vec<FlatRecord>, ExportError> {
    let file = File::open(path).map_err(io_err(path))?;
    let mut records = Vec::new();

    for line in BufReader::new(file).lines() {
        let line = line.map_err(io_err(path))?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line).map_err(json_err(path))?);
    }

    Ok(records)
}

/// Writes all records as a single JSON array to a new file.
///
/// # Errors
///
/// Returns [`ExportError::Io`] or [`ExportError::Json`] carrying `path`.
pub fn write_json_array(records: &[FlatRecord], path: &Path) -> Result<(), ExportError> {
    let file = crate::create_new(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, records).map_err(json_err(path))?;
    writer.flush().map_err(io_err(path))
}

/// Reads a file written by [`write_json_array`].
///
/// # Errors
///
/// Returns [`ExportError::Io`] or [`ExportError::Json`] carrying `path`.
pub fn read_json_array(path: &Path) -> Result<Vec<FlatRecord>, ExportError> {
    let file = File::open(path).map_err(io_err(path))?;
    serde_json::from_reader(BufReader::new(file)).map_err(json_err(path))
}
