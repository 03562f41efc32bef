//! Parquet output via Arrow record batches.
//!
//! Every column is UTF-8 except `price` (`Float64`). `date` is the only
//! non-nullable column and holds ISO `YYYY-MM-DD` text.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use cornershop_core::FlatRecord;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;

use crate::error::ExportError;

fn schema() -> Schema {
    let fields: Vec<Field> = FlatRecord::COLUMNS
        .iter()
        .map(|&name| match name {
            "date" => Field::new(name, DataType::Utf8, false),
            "price" => Field::new(name, DataType::Float64, true),
            _ => Field::new(name, DataType::Utf8, true),
        })
        .collect();
    Schema::new(fields)
}

fn text_column<F>(records: &[FlatRecord], get: F) -> ArrayRef
where
    F: Fn(&FlatRecord) -> Option<&str>,
{
    Arc::new(records.iter().map(get).collect::<StringArray>())
}

fn to_batch(records: &[FlatRecord]) -> Result<RecordBatch, ExportError> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(
            records
                .iter()
                .map(|r| Some(r.date.to_string()))
                .collect::<StringArray>(),
        ),
        text_column(records, |r| r.aisle_name.as_deref()),
        text_column(records, |r| r.product_name.as_deref()),
        text_column(records, |r| r.product_id.as_deref()),
        text_column(records, |r| r.brand.as_deref()),
        text_column(records, |r| r.brand_id.as_deref()),
        Arc::new(records.iter().map(|r| r.price).collect::<Float64Array>()),
        text_column(records, |r| r.package.as_deref()),
        text_column(records, |r| r.store_name.as_deref()),
        text_column(records, |r| r.store_id.as_deref()),
        text_column(records, |r| r.store_city.as_deref()),
        text_column(records, |r| r.search_term.as_deref()),
    ];
    Ok(RecordBatch::try_new(Arc::new(schema()), columns)?)
}

/// Writes `records` as a single-row-group Parquet file. `path` must not
/// exist yet.
///
/// # Errors
///
/// Returns [`ExportError::Io`], [`ExportError::Arrow`] or
/// [`ExportError::Parquet`].
pub fn write_parquet(records: &[FlatRecord], path: &Path) -> Result<(), ExportError> {
    let parquet_err = |source: parquet::errors::ParquetError| ExportError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let batch = to_batch(records)?;
    let file = crate::create_new(path)?;

    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).map_err(parquet_err)?;
    writer.write(&batch).map_err(parquet_err)?;
    writer.close().map_err(parquet_err)?;
    Ok(())
}

/// Reads a Parquet file written by [`write_parquet`].
///
/// # Errors
///
/// Returns [`ExportError::Io`], [`ExportError::Parquet`],
/// [`ExportError::Arrow`] or [`ExportError::Schema`] if a column is missing
/// or has an unexpected type.
pub fn read_parquet(path: &Path) -> Result<Vec<FlatRecord>, ExportError> {
    let parquet_err = |source: parquet::errors::ParquetError| ExportError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(parquet_err)?
        .build()
        .map_err(parquet_err)?;

    let mut records = Vec::new();
    for batch in reader {
        records.extend(from_batch(&batch?, path)?);
    }
    Ok(records)
}

fn from_batch(batch: &RecordBatch, path: &Path) -> Result<Vec<FlatRecord>, ExportError> {
    let strings = |name: &str| typed_column::<StringArray>(batch, name, path);

    let date = strings("date")?;
    let aisle_name = strings("aisle_name")?;
    let product_name = strings("product_name")?;
    let product_id = strings("product_id")?;
    let brand = strings("brand")?;
    let brand_id = strings("brand_id")?;
    let package = strings("package")?;
    let store_name = strings("store_name")?;
    let store_id = strings("store_id")?;
    let store_city = strings("store_city")?;
    let search_term = strings("search_term")?;
    let price = typed_column::<Float64Array>(batch, "price", path)?;

    (0..batch.num_rows())
        .map(|i| {
            let date = text_at(date, i)
                .and_then(|d| d.parse::<NaiveDate>().ok())
                .ok_or_else(|| ExportError::Schema {
                    path: path.to_path_buf(),
                    column: "date".to_string(),
                })?;
            Ok(FlatRecord {
                date,
                aisle_name: text_at(aisle_name, i),
                product_name: text_at(product_name, i),
                product_id: text_at(product_id, i),
                brand: text_at(brand, i),
                brand_id: text_at(brand_id, i),
                price: price.is_valid(i).then(|| price.value(i)),
                package: text_at(package, i),
                store_name: text_at(store_name, i),
                store_id: text_at(store_id, i),
                store_city: text_at(store_city, i),
                search_term: text_at(search_term, i),
            })
        })
        .collect()
}

fn typed_column<'a, A: Array + 'static>(
    batch: &'a RecordBatch,
    name: &str,
    path: &Path,
) -> Result<&'a A, ExportError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<A>())
        .ok_or_else(|| ExportError::Schema {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

fn text_at(array: &StringArray, i: usize) -> Option<String> {
    array.is_valid(i).then(|| array.value(i).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_follows_column_order() {
        let schema = schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, FlatRecord::COLUMNS);
        assert_eq!(
            schema.field_with_name("price").unwrap().data_type(),
            &DataType::Float64
        );
        assert!(!schema.field_with_name("date").unwrap().is_nullable());
    }

    #[test]
    fn empty_input_builds_empty_batch() {
        let batch = to_batch(&[]).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), FlatRecord::COLUMNS.len());
    }

    #[test]
    fn read_reports_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.parquet");
        let schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Utf8, true)]));
        let batch = RecordBatch::try_new(
            Arc::clone(&schema),
            vec![Arc::new(StringArray::from(vec![Some("a")])) as ArrayRef],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = read_parquet(&path).unwrap_err();

        assert!(
            matches!(err, ExportError::Schema { ref column, .. } if column == "date"),
            "expected Schema(date), got: {err:?}"
        );
    }
}
