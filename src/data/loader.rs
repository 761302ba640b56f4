use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{AttributeValue, ItemList};
use crate::config::DashboardConfig;

type Record = BTreeMap<String, AttributeValue>;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load item records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; one column per attribute, `id` required per row
/// * `.json`    – `[{ "id": ..., "price": ..., ... }, ...]`
/// * `.parquet` – flat columns, one per attribute
pub fn load_file(path: &Path) -> Result<ItemList> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    Ok(ItemList::from_records(records))
}

/// Load one of the datasets registered by name in the configuration.
pub fn load_named(name: &str, config: &DashboardConfig) -> Result<ItemList> {
    let Some(path) = config.datasets.get(name) else {
        bail!("No dataset named '{name}'");
    };
    load_file(path).with_context(|| format!("loading dataset '{name}' from {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if !headers.iter().any(|h| h == "id") {
        bail!("CSV missing 'id' column");
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Record = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.clone(), guess_value_type(cell)))
            .collect();
        records.push(row);
    }
    Ok(records)
}

fn guess_value_type(s: &str) -> AttributeValue {
    let s = s.trim();
    if s.is_empty() {
        return AttributeValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return AttributeValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return AttributeValue::Float(f);
    }
    if s == "true" || s == "false" {
        return AttributeValue::Bool(s == "true");
    }
    AttributeValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json_records(&text)
}

/// Records-oriented JSON: a top-level array of flat objects.
fn parse_json_records(text: &str) -> Result<Vec<Record>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let obj = row
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            Ok(obj
                .iter()
                .map(|(key, val)| (key.clone(), json_to_value(val)))
                .collect())
        })
        .collect()
}

fn json_to_value(val: &JsonValue) -> AttributeValue {
    match val {
        JsonValue::String(s) => AttributeValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                AttributeValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                AttributeValue::Float(f)
            } else {
                AttributeValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => AttributeValue::Bool(*b),
        JsonValue::Null => AttributeValue::Null,
        other => AttributeValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Every column is an attribute; the `id` column may be string or integer.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        if schema.index_of("id").is_err() {
            bail!("Parquet file missing 'id' column");
        }

        let columns: Vec<(String, &Arc<dyn Array>)> = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(f, col)| (f.name().clone(), col))
            .collect();

        for row in 0..batch.num_rows() {
            let record: Record = columns
                .iter()
                .map(|(name, col)| (name.clone(), extract_value(col, row)))
                .collect();
            records.push(record);
        }
    }

    Ok(records)
}

/// Extract a single attribute value from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> AttributeValue {
    if col.is_null(row) {
        return AttributeValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => match any.downcast_ref::<StringArray>() {
            Some(s) => AttributeValue::String(s.value(row).to_string()),
            None => AttributeValue::Null,
        },
        DataType::LargeUtf8 => {
            AttributeValue::String(col.as_string::<i64>().value(row).to_string())
        }
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(AttributeValue::Null, |a| AttributeValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(AttributeValue::Null, |a| AttributeValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(AttributeValue::Null, |a| AttributeValue::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(AttributeValue::Null, |a| AttributeValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(AttributeValue::Null, |a| AttributeValue::Bool(a.value(row))),
        other => {
            log::warn!("Unsupported parquet column type {other:?}; value read as null");
            AttributeValue::Null
        }
    }
}
