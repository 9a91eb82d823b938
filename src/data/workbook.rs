//! Load the capacity table from the canonical workbook (.xlsx "Data" sheet)
//! or from a CSV export with the same six columns.

use std::fmt;
use std::path::Path;

use calamine::Reader;

use crate::data::table::{DataTable, RawSheet, RawValue, SchemaError};

/// Sheet the canonical workbook keeps its records on.
pub const DATA_SHEET_NAME: &str = "Data";

pub const DEFAULT_WORKBOOK_PATH: &str = "data/services_calculator.xlsx";

#[derive(Debug)]
pub enum WorkbookError {
    Open(calamine::Error),
    Csv(csv::Error),
    MissingSheet(String),
    Schema(SchemaError),
}

impl fmt::Display for WorkbookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open workbook: {err}"),
            Self::Csv(err) => write!(f, "failed to read csv: {err}"),
            Self::MissingSheet(name) => write!(f, "workbook has no '{name}' sheet"),
            Self::Schema(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WorkbookError {}

impl From<SchemaError> for WorkbookError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

/// Load and validate a capacity table, dispatching on file extension:
/// `.csv` goes through the csv reader, everything else through calamine.
pub fn load_table(path: &Path) -> Result<DataTable, WorkbookError> {
    let sheet = if path.extension().map(|e| e == "csv").unwrap_or(false) {
        read_csv_sheet(path)?
    } else {
        read_workbook_sheet(path)?
    };
    Ok(DataTable::build(&sheet)?)
}

/// Read the "Data" sheet of an Excel workbook into a RawSheet.
/// First row is the header row; an empty sheet yields an empty RawSheet.
pub fn read_workbook_sheet(path: &Path) -> Result<RawSheet, WorkbookError> {
    let mut workbook = calamine::open_workbook_auto(path).map_err(WorkbookError::Open)?;
    if !workbook.sheet_names().iter().any(|s| s == DATA_SHEET_NAME) {
        return Err(WorkbookError::MissingSheet(DATA_SHEET_NAME.to_string()));
    }
    let range = workbook
        .worksheet_range(DATA_SHEET_NAME)
        .map_err(WorkbookError::Open)?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(RawSheet::default());
    };

    let headers = header_row.iter().map(cell_header).collect();
    let data_rows = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Ok(RawSheet {
        headers,
        rows: data_rows,
    })
}

/// Read a CSV export (header row first) into a RawSheet. Every cell arrives
/// as text; numeric coercion happens in [DataTable::build].
pub fn read_csv_sheet(path: &Path) -> Result<RawSheet, WorkbookError> {
    let mut reader = csv::Reader::from_path(path).map_err(WorkbookError::Csv)?;

    let headers = reader
        .headers()
        .map_err(WorkbookError::Csv)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(WorkbookError::Csv)?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        RawValue::Empty
                    } else {
                        RawValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawSheet { headers, rows })
}

fn cell_header(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::String(s) => s.trim().to_string(),
        calamine::Data::Empty => String::new(),
        other => format!("{other}"),
    }
}

fn cell_value(cell: &calamine::Data) -> RawValue {
    match cell {
        calamine::Data::String(s) => {
            if s.trim().is_empty() {
                RawValue::Empty
            } else {
                RawValue::Text(s.clone())
            }
        }
        calamine::Data::Float(f) => RawValue::Number(*f),
        calamine::Data::Int(i) => RawValue::Number(*i as f64),
        calamine::Data::Bool(b) => RawValue::Number(if *b { 1.0 } else { 0.0 }),
        calamine::Data::DateTime(dt) => RawValue::Number(dt.as_f64()),
        _ => RawValue::Empty,
    }
}
