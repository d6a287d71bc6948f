use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::{DataType, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{Record, SalaryDataset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal load-time failure. Surfaced once when the file is opened,
/// never per interaction.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("reading file: {0}")]
    Io(#[from] std::io::Error),
    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("reading arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: {message}")]
    BadRow { row: usize, message: String },
}

fn bad_row(row: usize, message: impl Into<String>) -> LoadError {
    LoadError::BadRow {
        row,
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Column schema
// ---------------------------------------------------------------------------

/// Accepted header names per field. The first entry is the canonical
/// English name; the rest are the original dataset's Portuguese headers
/// and common export variants.
const YEAR: &[&str] = &["year", "ano", "work_year"];
const ROLE: &[&str] = &["role", "cargo", "job_title"];
const SENIORITY: &[&str] = &["seniority", "senioridade", "experience_level"];
const CONTRACT: &[&str] = &["contract", "contrato", "employment_type"];
const COMPANY_SIZE: &[&str] = &["company_size", "tamanho_empresa"];
const REMOTE_RATIO: &[&str] = &["remote_ratio", "remoto"];
const COUNTRY: &[&str] = &["country", "residencia_iso3", "employee_residence"];
const SALARY_USD: &[&str] = &["salary_usd", "usd", "salary_in_usd"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a salary dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – scalar columns matching the schema above
/// * `.json`    – records-oriented array of objects
/// * `.csv`     – header row with one column per field
pub fn load_file(path: &Path) -> Result<SalaryDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Reject records violating the dataset invariant: the four filter
/// dimensions must be non-empty and the salary non-negative.
fn validate(rec: &Record, row: usize) -> Result<(), LoadError> {
    if rec.seniority.trim().is_empty() {
        return Err(bad_row(row, "empty seniority"));
    }
    if rec.contract.trim().is_empty() {
        return Err(bad_row(row, "empty contract type"));
    }
    if rec.company_size.trim().is_empty() {
        return Err(bad_row(row, "empty company size"));
    }
    if !rec.salary_usd.is_finite() || rec.salary_usd < 0.0 {
        return Err(bad_row(row, format!("invalid salary {}", rec.salary_usd)));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<SalaryDataset, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let find = |names: &'static [&'static str]| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
            .ok_or(LoadError::MissingColumn(names[0]))
    };

    let year_idx = find(YEAR)?;
    let role_idx = find(ROLE)?;
    let seniority_idx = find(SENIORITY)?;
    let contract_idx = find(CONTRACT)?;
    let size_idx = find(COMPANY_SIZE)?;
    let remote_idx = find(REMOTE_RATIO)?;
    let country_idx = find(COUNTRY)?;
    let salary_idx = find(SALARY_USD)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

        let year = cell(year_idx)
            .parse::<i32>()
            .map_err(|_| bad_row(row_no, format!("'{}' is not a year", cell(year_idx))))?;
        // Salaries sometimes arrive as "60000.0", sometimes as "60000".
        let salary_usd = cell(salary_idx)
            .parse::<f64>()
            .map_err(|_| bad_row(row_no, format!("'{}' is not a salary", cell(salary_idx))))?;

        let rec = Record {
            year,
            role: cell(role_idx).to_string(),
            seniority: cell(seniority_idx).to_string(),
            contract: cell(contract_idx).to_string(),
            company_size: cell(size_idx).to_string(),
            remote_ratio: cell(remote_idx).to_string(),
            country: cell(country_idx).to_string(),
            salary_usd,
        };
        validate(&rec, row_no)?;
        records.push(rec);
    }

    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "year": 2023,
///     "role": "Data Scientist",
///     "seniority": "Senior",
///     "contract": "Full-time",
///     "company_size": "Large",
///     "remote_ratio": "Remote",
///     "country": "USA",
///     "salary_usd": 150000.0
///   },
///   ...
/// ]
/// ```
///
/// Field-name aliases are handled by the serde derive on [`Record`].
fn load_json(path: &Path) -> Result<SalaryDataset, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let records: Vec<Record> = serde_json::from_str(&text)?;

    for (row_no, rec) in records.iter().enumerate() {
        validate(rec, row_no)?;
    }

    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per schema field.
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<SalaryDataset, LoadError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    let mut row_base = 0usize;

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let n_rows = batch.num_rows();

        let year_col = batch.column(column_index(&schema, YEAR)?);
        let role_col = batch.column(column_index(&schema, ROLE)?);
        let seniority_col = batch.column(column_index(&schema, SENIORITY)?);
        let contract_col = batch.column(column_index(&schema, CONTRACT)?);
        let size_col = batch.column(column_index(&schema, COMPANY_SIZE)?);
        let remote_col = batch.column(column_index(&schema, REMOTE_RATIO)?);
        let country_col = batch.column(column_index(&schema, COUNTRY)?);
        let salary_col = batch.column(column_index(&schema, SALARY_USD)?);

        for row in 0..n_rows {
            let row_no = row_base + row;
            let rec = Record {
                year: int_at(year_col, row, row_no)? as i32,
                role: string_at(role_col, row, row_no)?,
                seniority: string_at(seniority_col, row, row_no)?,
                contract: string_at(contract_col, row, row_no)?,
                company_size: string_at(size_col, row, row_no)?,
                remote_ratio: string_at(remote_col, row, row_no)?,
                country: string_at(country_col, row, row_no)?,
                salary_usd: float_at(salary_col, row, row_no)?,
            };
            validate(&rec, row_no)?;
            records.push(rec);
        }
        row_base += n_rows;
    }

    Ok(SalaryDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column_index(schema: &Schema, names: &'static [&'static str]) -> Result<usize, LoadError> {
    schema
        .fields()
        .iter()
        .position(|f| names.iter().any(|n| f.name().eq_ignore_ascii_case(n)))
        .ok_or(LoadError::MissingColumn(names[0]))
}

fn string_at(col: &Arc<dyn Array>, row: usize, row_no: usize) -> Result<String, LoadError> {
    if col.is_null(row) {
        return Err(bad_row(row_no, "null value in string column"));
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| bad_row(row_no, "expected StringArray"))?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<LargeStringArray>()
                .ok_or_else(|| bad_row(row_no, "expected LargeStringArray"))?;
            Ok(arr.value(row).to_string())
        }
        other => Err(bad_row(row_no, format!("expected string column, got {other:?}"))),
    }
}

fn int_at(col: &Arc<dyn Array>, row: usize, row_no: usize) -> Result<i64, LoadError> {
    if col.is_null(row) {
        return Err(bad_row(row_no, "null value in integer column"));
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .ok_or_else(|| bad_row(row_no, "expected Int32Array"))?;
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or_else(|| bad_row(row_no, "expected Int64Array"))?;
            Ok(arr.value(row))
        }
        other => Err(bad_row(row_no, format!("expected integer column, got {other:?}"))),
    }
}

fn float_at(col: &Arc<dyn Array>, row: usize, row_no: usize) -> Result<f64, LoadError> {
    if col.is_null(row) {
        return Err(bad_row(row_no, "null value in numeric column"));
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| bad_row(row_no, "expected Float64Array"))?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .ok_or_else(|| bad_row(row_no, "expected Float32Array"))?;
            Ok(arr.value(row) as f64)
        }
        // Integer salaries are common in the raw exports.
        DataType::Int32 | DataType::Int64 => int_at(col, row, row_no).map(|v| v as f64),
        other => Err(bad_row(row_no, format!("expected numeric column, got {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("salary-scope-{}-{name}", std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_with_english_headers_loads() {
        let path = write_temp(
            "english.csv",
            "year,role,seniority,contract,company_size,remote_ratio,country,salary_usd\n\
             2023,Data Scientist,Senior,Full-time,Large,Remote,USA,150000\n\
             2023,Data Analyst,Junior,Full-time,Small,Hybrid,DEU,60000.0\n",
        );
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].role, "Data Scientist");
        assert_eq!(ds.records[1].salary_usd, 60_000.0);
        assert_eq!(ds.years, vec![2023]);
    }

    #[test]
    fn csv_with_portuguese_headers_loads() {
        let path = write_temp(
            "portuguese.csv",
            "ano,senioridade,contrato,cargo,tamanho_empresa,remoto,residencia_iso3,usd\n\
             2024,Senior,Full-time,Data Engineer,Medium,Remote,BRA,95000\n",
        );
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].role, "Data Engineer");
        assert_eq!(ds.records[0].country, "BRA");
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let path = write_temp(
            "missing.csv",
            "year,role,seniority,contract,company_size,remote_ratio,country\n\
             2023,Data Scientist,Senior,Full-time,Large,Remote,USA\n",
        );
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, LoadError::MissingColumn("salary_usd")));
    }

    #[test]
    fn negative_salary_is_a_load_error() {
        let path = write_temp(
            "negative.csv",
            "year,role,seniority,contract,company_size,remote_ratio,country,salary_usd\n\
             2023,Data Scientist,Senior,Full-time,Large,Remote,USA,-1\n",
        );
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, LoadError::BadRow { row: 0, .. }));
    }

    #[test]
    fn records_oriented_json_loads() {
        let path = write_temp(
            "records.json",
            r#"[{"year":2023,"role":"Data Scientist","seniority":"Senior","contract":"Full-time",
                "company_size":"Large","remote_ratio":"Remote","country":"USA","salary_usd":150000.0}]"#,
        );
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].year, 2023);
    }

    #[test]
    fn json_accepts_portuguese_field_names() {
        let path = write_temp(
            "aliases.json",
            r#"[{"ano":2024,"cargo":"Data Analyst","senioridade":"Junior","contrato":"Full-time",
                "tamanho_empresa":"Small","remoto":"Hybrid","residencia_iso3":"BRA","usd":48000.0}]"#,
        );
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(ds.records[0].role, "Data Analyst");
        assert_eq!(ds.records[0].country, "BRA");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("salaries.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(_)));
    }
}
