use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DataLoadError;
use super::model::{
    LaunchDataset, LaunchRecord, Outcome, BOOSTER_CATEGORY_COLUMN, BOOSTER_VERSION_COLUMN,
    CLASS_COLUMN, FLIGHT_NUMBER_COLUMN, PAYLOAD_COLUMN, SITE_COLUMN,
};

type Result<T> = std::result::Result<T, DataLoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the four required columns
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Required columns: `Launch Site`, `Payload Mass (kg)`, `class`,
/// `Booster Version Category`.  `Flight Number` and `Booster Version` are
/// picked up when present.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataLoadError::UnsupportedFormat(other.to_string())),
    };

    Ok(LaunchDataset::from_records(records))
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

fn parse_payload(raw: &str, row: usize) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| DataLoadError::invalid(row, PAYLOAD_COLUMN, raw))?;
    check_payload(value, row)
}

fn check_payload(value: f64, row: usize) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DataLoadError::invalid(row, PAYLOAD_COLUMN, value))
    }
}

fn parse_outcome(raw: &str, row: usize) -> Result<Outcome> {
    Outcome::from_flag_str(raw).ok_or_else(|| DataLoadError::invalid(row, CLASS_COLUMN, raw))
}

fn parse_flight_number(raw: &str, row: usize) -> Result<Option<u32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| DataLoadError::invalid(row, FLIGHT_NUMBER_COLUMN, raw))
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
/// Extra columns (e.g. an unnamed index column) are ignored.
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers = reader.headers()?.clone();

    let position = |name: &str| headers.iter().position(|h| h.trim() == name);
    let require =
        |name: &str| position(name).ok_or_else(|| DataLoadError::MissingColumn(name.to_string()));

    let site_idx = require(SITE_COLUMN)?;
    let payload_idx = require(PAYLOAD_COLUMN)?;
    let class_idx = require(CLASS_COLUMN)?;
    let category_idx = require(BOOSTER_CATEGORY_COLUMN)?;
    let flight_idx = position(FLIGHT_NUMBER_COLUMN);
    let version_idx = position(BOOSTER_VERSION_COLUMN);

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let flight_number = match flight_idx {
            Some(idx) => parse_flight_number(cell(idx), row_no)?,
            None => None,
        };

        records.push(LaunchRecord {
            site: cell(site_idx).trim().to_string(),
            payload_mass_kg: parse_payload(cell(payload_idx), row_no)?,
            outcome: parse_outcome(cell(class_idx), row_no)?,
            booster_category: cell(category_idx).trim().to_string(),
            flight_number,
            booster_version: version_idx.and_then(|idx| non_empty(cell(idx))),
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;

    let rows = root
        .as_array()
        .ok_or_else(|| DataLoadError::invalid(0, "<root>", "expected top-level JSON array"))?;

    rows.iter()
        .enumerate()
        .map(|(row_no, rec)| {
            let obj = rec
                .as_object()
                .ok_or_else(|| DataLoadError::invalid(row_no, "<row>", "not a JSON object"))?;
            json_record(obj, row_no)
        })
        .collect()
}

fn json_record(obj: &Map<String, JsonValue>, row: usize) -> Result<LaunchRecord> {
    let field = |name: &str| {
        obj.get(name)
            .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
    };

    let payload = match field(PAYLOAD_COLUMN)? {
        JsonValue::Number(n) => check_payload(n.as_f64().unwrap_or(f64::NAN), row)?,
        JsonValue::String(s) => parse_payload(s, row)?,
        other => return Err(DataLoadError::invalid(row, PAYLOAD_COLUMN, other)),
    };

    let outcome = match field(CLASS_COLUMN)? {
        JsonValue::Number(n) => n
            .as_f64()
            .and_then(Outcome::from_flag)
            .ok_or_else(|| DataLoadError::invalid(row, CLASS_COLUMN, n))?,
        JsonValue::String(s) => parse_outcome(s, row)?,
        other => return Err(DataLoadError::invalid(row, CLASS_COLUMN, other)),
    };

    let flight_number = match obj.get(FLIGHT_NUMBER_COLUMN) {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::Number(n)) => Some(
            n.as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| DataLoadError::invalid(row, FLIGHT_NUMBER_COLUMN, n))?,
        ),
        Some(JsonValue::String(s)) => parse_flight_number(s, row)?,
        Some(other) => return Err(DataLoadError::invalid(row, FLIGHT_NUMBER_COLUMN, other)),
    };

    Ok(LaunchRecord {
        site: json_text(field(SITE_COLUMN)?),
        payload_mass_kg: payload,
        outcome,
        booster_category: json_text(field(BOOSTER_CATEGORY_COLUMN)?),
        flight_number,
        booster_version: obj
            .get(BOOSTER_VERSION_COLUMN)
            .map(json_text)
            .and_then(|s| non_empty(&s)),
    })
}

fn json_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat launch columns.
///
/// Numeric columns may be any integer or float width and text columns
/// `Utf8` or `LargeUtf8`; everything is cast to `Float64` / `Utf8` first.
/// Works with files written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;

    // A file without row groups yields no batches, so check the schema up front.
    for name in [SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN, BOOSTER_CATEGORY_COLUMN] {
        builder
            .schema()
            .index_of(name)
            .map_err(|_| DataLoadError::MissingColumn(name.to_string()))?;
    }

    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let column = |name: &str| -> Result<ArrayRef> {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx).clone())
                .map_err(|_| DataLoadError::MissingColumn(name.to_string()))
        };
        let optional = |name: &str| schema.index_of(name).ok().map(|idx| batch.column(idx).clone());

        let sites = cast(&column(SITE_COLUMN)?, &DataType::Utf8)?;
        let payloads = as_f64(&column(PAYLOAD_COLUMN)?)?;
        let classes = as_f64(&column(CLASS_COLUMN)?)?;
        let categories = cast(&column(BOOSTER_CATEGORY_COLUMN)?, &DataType::Utf8)?;
        let flights = optional(FLIGHT_NUMBER_COLUMN).map(|c| as_f64(&c)).transpose()?;
        let versions = optional(BOOSTER_VERSION_COLUMN)
            .map(|c| cast(&c, &DataType::Utf8))
            .transpose()?;

        let sites = sites.as_string::<i32>();
        let categories = categories.as_string::<i32>();
        let versions = versions.as_ref().map(|v| v.as_string::<i32>());

        for row in 0..batch.num_rows() {
            let row_no = records.len();

            if payloads.is_null(row) {
                return Err(DataLoadError::invalid(row_no, PAYLOAD_COLUMN, "null"));
            }
            if classes.is_null(row) {
                return Err(DataLoadError::invalid(row_no, CLASS_COLUMN, "null"));
            }

            let class = classes.value(row);
            let outcome = Outcome::from_flag(class)
                .ok_or_else(|| DataLoadError::invalid(row_no, CLASS_COLUMN, class))?;

            let flight_number = match &flights {
                Some(f) if !f.is_null(row) => {
                    let v = f.value(row);
                    if v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
                        return Err(DataLoadError::invalid(row_no, FLIGHT_NUMBER_COLUMN, v));
                    }
                    Some(v as u32)
                }
                _ => None,
            };

            records.push(LaunchRecord {
                site: string_at(sites, row),
                payload_mass_kg: check_payload(payloads.value(row), row_no)?,
                outcome,
                booster_category: string_at(categories, row),
                flight_number,
                booster_version: versions.and_then(|v| non_empty(&string_at(v, row))),
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Cast any numeric column to `Float64`.
fn as_f64(col: &ArrayRef) -> Result<Float64Array> {
    let casted = cast(col, &DataType::Float64)?;
    Ok(casted.as_primitive::<arrow::datatypes::Float64Type>().clone())
}

fn string_at(col: &arrow::array::StringArray, row: usize) -> String {
    if col.is_null(row) {
        String::new()
    } else {
        col.value(row).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    const CSV_HEADER: &str =
        ",Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_csv() {
        let dir = TempDir::new().unwrap();
        let csv = format!(
            "{CSV_HEADER}\n\
             0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
             1,2,KSC LC-39A,1,525,F9 FT B1031.1,FT\n\
             2,3,CCAFS LC-40,1.0,9600.0,F9 B4 B1039.1,B4\n"
        );
        let path = write_file(&dir, "launches.csv", &csv);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.distinct_sites(), ["CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(ds.min_payload(), 0.0);
        assert_eq!(ds.max_payload(), 9600.0);

        let second = &ds.records()[1];
        assert_eq!(second.outcome, Outcome::Success);
        assert_eq!(second.payload_mass_kg, 525.0);
        assert_eq!(second.booster_category, "FT");
        assert_eq!(second.flight_number, Some(2));
        assert_eq!(second.booster_version.as_deref(), Some("F9 FT B1031.1"));
    }

    #[test]
    fn test_csv_optional_columns_may_be_absent() {
        let dir = TempDir::new().unwrap();
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
                   VAFB SLC-4E,500,1,FT\n";
        let path = write_file(&dir, "minimal.csv", csv);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records()[0].flight_number, None);
        assert_eq!(ds.records()[0].booster_version, None);
    }

    #[test]
    fn test_csv_missing_column() {
        let dir = TempDir::new().unwrap();
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category\nKSC,500,FT\n";
        let path = write_file(&dir, "nocls.csv", csv);

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == "class"));
    }

    #[test]
    fn test_csv_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        let negative = "Launch Site,Payload Mass (kg),class,Booster Version Category\nKSC,-5,1,FT\n";
        let path = write_file(&dir, "neg.csv", negative);
        assert!(matches!(
            load_file(&path).unwrap_err(),
            DataLoadError::InvalidValue { row: 0, .. }
        ));

        let bad_class = "Launch Site,Payload Mass (kg),class,Booster Version Category\nKSC,5,1,FT\nKSC,5,3,FT\n";
        let path = write_file(&dir, "cls.csv", bad_class);
        match load_file(&path).unwrap_err() {
            DataLoadError::InvalidValue { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, CLASS_COLUMN);
                assert_eq!(value, "3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_and_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.csv");
        assert!(matches!(load_file(&missing).unwrap_err(), DataLoadError::Io { .. }));

        let path = write_file(&dir, "data.xlsx", "");
        assert!(matches!(
            load_file(&path).unwrap_err(),
            DataLoadError::UnsupportedFormat(ref ext) if ext == "xlsx"
        ));
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let json = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 3000, "class": 1,
             "Booster Version Category": "FT", "Flight Number": 7},
            {"Launch Site": "CCAFS SLC-40", "Payload Mass (kg)": "7000.5", "class": "0",
             "Booster Version Category": "B5", "Booster Version": "F9 B5"}
        ]"#;
        let path = write_file(&dir, "launches.json", json);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].flight_number, Some(7));
        assert_eq!(ds.records()[1].payload_mass_kg, 7000.5);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
        assert_eq!(ds.records()[1].booster_version.as_deref(), Some("F9 B5"));
    }

    #[test]
    fn test_json_missing_field() {
        let dir = TempDir::new().unwrap();
        let json = r#"[{"Launch Site": "KSC", "class": 1, "Booster Version Category": "FT"}]"#;
        let path = write_file(&dir, "bad.json", json);
        assert!(matches!(
            load_file(&path).unwrap_err(),
            DataLoadError::MissingColumn(ref c) if c == PAYLOAD_COLUMN
        ));
    }

    #[test]
    fn test_load_parquet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("launches.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new(SITE_COLUMN, DataType::Utf8, false),
            Field::new(PAYLOAD_COLUMN, DataType::Float64, false),
            Field::new(CLASS_COLUMN, DataType::Int64, false),
            Field::new(BOOSTER_CATEGORY_COLUMN, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC", "CCAFS", "KSC"])),
                Arc::new(Float64Array::from(vec![3000.0, 450.0, 7000.0])),
                Arc::new(Int64Array::from(vec![1, 0, 0])),
                Arc::new(StringArray::from(vec!["FT", "v1.1", "B4"])),
            ],
        )
        .unwrap();
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.distinct_sites(), ["KSC", "CCAFS"]);
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[2].payload_mass_kg, 7000.0);
        assert_eq!(ds.min_payload(), 450.0);
    }

    #[test]
    fn test_parquet_without_rows_still_needs_required_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.parquet");

        let schema = Arc::new(Schema::new(vec![Field::new("foo", DataType::Utf8, true)]));
        let file = File::create(&path).unwrap();
        let writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.close().unwrap();

        assert!(matches!(
            load_file(&path).unwrap_err(),
            DataLoadError::MissingColumn(ref c) if c == SITE_COLUMN
        ));
    }

    #[test]
    fn test_parquet_without_rows_but_full_schema_is_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_launches.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new(SITE_COLUMN, DataType::Utf8, false),
            Field::new(PAYLOAD_COLUMN, DataType::Float64, false),
            Field::new(CLASS_COLUMN, DataType::Int64, false),
            Field::new(BOOSTER_CATEGORY_COLUMN, DataType::Utf8, false),
        ]));
        let file = File::create(&path).unwrap();
        let writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert!(ds.is_empty());
    }
}
