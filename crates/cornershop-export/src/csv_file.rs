use std::path::Path;

use cornershop_core::FlatRecord;

use crate::error::ExportError;

/// Writes `records` as CSV with a header row to a new file. The header is
/// written even when `records` is empty.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] or [`ExportError::Io`] carrying `path`;
/// an existing file at `path` is an [`ExportError::Io`].
pub fn write_csv(records: &[FlatRecord], path: &Path) -> Result<(), ExportError> {
    let csv_err = |source: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = crate::create_new(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(FlatRecord::COLUMNS).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }

    writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads a CSV file written by [`write_csv`]. Empty cells read back as `None`.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] carrying `path`.
pub fn read_csv(path: &Path) -> Result<Vec<FlatRecord>, ExportError> {
    let csv_err = |source: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    reader
        .deserialize::<FlatRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)
}
