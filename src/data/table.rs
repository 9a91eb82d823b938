//! Validated capacity table: one Record per (Service, Building, Level).
//! Built once from a RawSheet (workbook or CSV), read-only afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Required column headers, matched case-sensitively after trimming.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Service",
    "Building",
    "Level",
    "Capacity",
    "CumCost",
    "MaxLevel",
];

/// One cell of raw tabular input, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Empty,
}

impl RawValue {
    /// Trimmed text content; numbers render via their display form so a
    /// numeric Service cell still counts as present.
    fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            RawValue::Number(n) => Some(format!("{n}")),
            RawValue::Empty => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Integer coercion: integral numbers only, fractional values are absent.
    fn as_integer(&self) -> Option<i64> {
        let n = self.as_number()?;
        if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
            Some(n as i64)
        } else {
            None
        }
    }
}

/// Neutral tabular input produced by the workbook/CSV loaders.
/// `headers` is the first row; each data row is positional against it.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

/// One validated row of the capacity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub service: String,
    pub building: String,
    pub level: u32,
    pub capacity: f64,
    pub cum_cost: f64,
    pub max_level: u32,
}

/// Required columns missing from the input. Fatal: no partial table is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub missing_columns: Vec<String>,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "data sheet missing columns: {}",
            self.missing_columns.join(", ")
        )
    }
}

impl std::error::Error for SchemaError {}

/// In-memory capacity table. Immutable after [DataTable::build]; a re-upload
/// replaces the whole table.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    records: Vec<Record>,
}

impl DataTable {
    /// Build a table from raw rows. Fails only when required columns are
    /// missing; individual rows with an absent Service, Building, or Level
    /// are dropped, and a fully-invalid input yields an empty table.
    pub fn build(sheet: &RawSheet) -> Result<DataTable, SchemaError> {
        let headers: Vec<&str> = sheet.headers.iter().map(|h| h.trim()).collect();

        let mut missing = Vec::new();
        for needed in REQUIRED_COLUMNS {
            if !headers.contains(&needed) {
                missing.push(needed.to_string());
            }
        }
        if !missing.is_empty() {
            return Err(SchemaError {
                missing_columns: missing,
            });
        }

        let column = |name: &str| -> usize {
            headers
                .iter()
                .position(|h| *h == name)
                .unwrap_or(usize::MAX)
        };
        let service_col = column("Service");
        let building_col = column("Building");
        let level_col = column("Level");
        let capacity_col = column("Capacity");
        let cum_cost_col = column("CumCost");
        let max_level_col = column("MaxLevel");

        let cell = |row: &[RawValue], index: usize| -> RawValue {
            row.get(index).cloned().unwrap_or(RawValue::Empty)
        };

        let mut records = Vec::new();
        for row in &sheet.rows {
            let Some(service) = cell(row, service_col).as_text() else {
                continue;
            };
            let Some(building) = cell(row, building_col).as_text() else {
                continue;
            };
            // Levels are positive integers; anything else drops the row.
            let Some(level) = cell(row, level_col)
                .as_integer()
                .filter(|lvl| *lvl >= 1)
                .map(|lvl| lvl as u32)
            else {
                continue;
            };

            let capacity = cell(row, capacity_col).as_number().unwrap_or(0.0);
            let cum_cost = cell(row, cum_cost_col).as_number().unwrap_or(0.0);
            // MaxLevel is trusted data, not recomputed from the level set; an
            // unparseable cell falls back to the row's own level.
            let max_level = cell(row, max_level_col)
                .as_integer()
                .filter(|lvl| *lvl >= 1)
                .map(|lvl| lvl as u32)
                .unwrap_or(level);

            records.push(Record {
                service,
                building,
                level,
                capacity,
                cum_cost,
                max_level,
            });
        }

        Ok(DataTable { records })
    }

    /// Table from already-validated records (tests and in-memory fixtures).
    pub fn from_records(records: Vec<Record>) -> DataTable {
        DataTable { records }
    }

    /// Exact composite-key lookup. Input strings are trimmed before matching.
    /// When duplicate keys exist in the source data the first record in input
    /// order wins; uniqueness is not enforced at build time.
    pub fn find(&self, service: &str, building: &str, level: u32) -> Option<&Record> {
        let service = service.trim();
        let building = building.trim();
        self.records
            .iter()
            .find(|r| r.service == service && r.building == building && r.level == level)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct services, sorted.
    pub fn services(&self) -> Vec<String> {
        let mut services: Vec<String> = self.records.iter().map(|r| r.service.clone()).collect();
        services.sort();
        services.dedup();
        services
    }

    /// Distinct buildings for a service, sorted.
    pub fn buildings_for(&self, service: &str) -> Vec<String> {
        let service = service.trim();
        let mut buildings: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.service == service)
            .map(|r| r.building.clone())
            .collect();
        buildings.sort();
        buildings.dedup();
        buildings
    }

    /// Highest MaxLevel recorded for a (service, building) pair, or None when
    /// the pair has no records.
    pub fn max_level_for(&self, service: &str, building: &str) -> Option<u32> {
        let service = service.trim();
        let building = building.trim();
        self.records
            .iter()
            .filter(|r| r.service == service && r.building == building)
            .map(|r| r.max_level)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::{DataTable, RawSheet, RawValue};

    fn sheet(rows: Vec<Vec<RawValue>>) -> RawSheet {
        RawSheet {
            headers: vec![
                "Service".to_string(),
                "Building".to_string(),
                "Level".to_string(),
                "Capacity".to_string(),
                "CumCost".to_string(),
                "MaxLevel".to_string(),
            ],
            rows,
        }
    }

    fn row(service: &str, building: &str, level: f64, capacity: f64) -> Vec<RawValue> {
        vec![
            RawValue::Text(service.to_string()),
            RawValue::Text(building.to_string()),
            RawValue::Number(level),
            RawValue::Number(capacity),
            RawValue::Number(100.0),
            RawValue::Number(5.0),
        ]
    }

    #[test]
    fn trims_header_and_string_fields() {
        let mut input = sheet(vec![row("  Water ", " Plant", 1.0, 50.0)]);
        input.headers[0] = " Service ".to_string();
        let table = DataTable::build(&input).expect("schema should be valid");
        assert_eq!(table.records()[0].service, "Water");
        assert_eq!(table.records()[0].building, "Plant");
    }

    #[test]
    fn fractional_level_drops_row() {
        let input = sheet(vec![row("Water", "Plant", 2.5, 50.0)]);
        let table = DataTable::build(&input).expect("schema should be valid");
        assert!(table.is_empty());
    }

    #[test]
    fn integral_float_level_is_accepted() {
        let input = sheet(vec![row("Water", "Plant", 3.0, 50.0)]);
        let table = DataTable::build(&input).expect("schema should be valid");
        assert_eq!(table.records()[0].level, 3);
    }

    #[test]
    fn zero_level_drops_row() {
        let input = sheet(vec![row("Water", "Plant", 0.0, 50.0)]);
        let table = DataTable::build(&input).expect("schema should be valid");
        assert!(table.is_empty());
    }

    #[test]
    fn unparseable_capacity_coerces_to_zero() {
        let mut bad = row("Water", "Plant", 1.0, 0.0);
        bad[3] = RawValue::Text("n/a".to_string());
        let table = DataTable::build(&sheet(vec![bad])).expect("schema should be valid");
        assert_eq!(table.records()[0].capacity, 0.0);
    }

    #[test]
    fn numeric_text_cells_parse() {
        let mut textual = row("Water", "Plant", 0.0, 0.0);
        textual[2] = RawValue::Text(" 4 ".to_string());
        textual[3] = RawValue::Text("12.5".to_string());
        let table = DataTable::build(&sheet(vec![textual])).expect("schema should be valid");
        assert_eq!(table.records()[0].level, 4);
        assert_eq!(table.records()[0].capacity, 12.5);
    }

    #[test]
    fn missing_max_level_falls_back_to_level() {
        let mut partial = row("Water", "Plant", 3.0, 50.0);
        partial[5] = RawValue::Empty;
        let table = DataTable::build(&sheet(vec![partial])).expect("schema should be valid");
        assert_eq!(table.records()[0].max_level, 3);
    }

    #[test]
    fn find_trims_query_strings() {
        let table = DataTable::build(&sheet(vec![row("Water", "Plant", 1.0, 50.0)]))
            .expect("schema should be valid");
        assert!(table.find("  Water ", "Plant ", 1).is_some());
    }
}
