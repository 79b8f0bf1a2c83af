use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::TableError;
use super::model::WideTable;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a wide table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row `country,1800,1801,...`, one row per country
/// * `.parquet` – same layout, one column per year of any scalar type
pub fn load_wide_table(path: &Path) -> Result<WideTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening CSV {}", path.display()))?;
            read_csv(file).with_context(|| format!("reading CSV {}", path.display()))?
        }
        "parquet" | "pq" => load_parquet(path)
            .with_context(|| format!("reading parquet {}", path.display()))?,
        other => return Err(TableError::UnsupportedExtension(other.to_string()).into()),
    };

    log::info!(
        "Loaded {} ({} rows x {} columns)",
        path.display(),
        table.n_rows(),
        table.n_columns()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a wide table from any CSV source. Cells are kept verbatim; rows whose
/// length differs from the header are rejected.
pub fn read_csv<R: Read>(source: R) -> Result<WideTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(TableError::EmptyHeader.into());
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            return Err(TableError::RaggedRow {
                row: row_no,
                expected: headers.len(),
                found: record.len(),
            }
            .into());
        }
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(WideTable::new(headers, rows))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file laid out like the CSV tables. Every cell is rendered to
/// text so the same lenient coercion applies regardless of the stored type.
fn load_parquet(path: &Path) -> Result<WideTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    if headers.is_empty() {
        return Err(TableError::EmptyHeader.into());
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| cell_to_string(col, row))
                .collect::<Result<Vec<_>>>()?;
            rows.push(cells);
        }
    }

    Ok(WideTable::new(headers, rows))
}

/// Render a single Arrow cell as raw text. Nulls become the empty string.
fn cell_to_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row).to_string(),
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row).to_string(),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row).to_string(),
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row).to_string(),
        _ => array_value_to_string(col.as_ref(), row)
            .with_context(|| format!("formatting {:?} cell", col.data_type()))?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    #[test]
    fn reads_csv_cells_verbatim() {
        let csv = "country,2000,2001\nChad,\"1,200\",7.2k\nPeru,,abc\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, ["country", "2000", "2001"]);
        assert_eq!(table.rows[0], ["Chad", "1,200", "7.2k"]);
        assert_eq!(table.rows[1], ["Peru", "", "abc"]);
    }

    #[test]
    fn ragged_csv_row_is_fatal() {
        let csv = "country,2000,2001\nChad,1\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TableError>(),
            Some(&TableError::RaggedRow {
                row: 0,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_wide_table(Path::new("pop.xlsx")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TableError>(),
            Some(&TableError::UnsupportedExtension("xlsx".into()))
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_wide_table(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn loads_csv_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lex.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "country,1990").unwrap();
        writeln!(f, "Chad,45.1").unwrap();
        drop(f);

        let table = load_wide_table(&path).unwrap();
        assert_eq!(table.n_rows(), 1);
        assert_eq!(table.rows[0], ["Chad", "45.1"]);
    }

    #[test]
    fn loads_parquet_with_mixed_types_and_nulls() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("country", DataType::Utf8, false),
            Field::new("2000", DataType::Int64, true),
            Field::new("2001", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Chad", "Peru"])),
                Arc::new(Int64Array::from(vec![Some(10), None])),
                Arc::new(Float64Array::from(vec![Some(1.5), Some(2.0)])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pop.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_wide_table(&path).unwrap();
        assert_eq!(table.headers, ["country", "2000", "2001"]);
        assert_eq!(table.rows[0], ["Chad", "10", "1.5"]);
        assert_eq!(table.rows[1], ["Peru", "", "2"]);
    }
}
