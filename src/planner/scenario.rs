//! Scenario aggregation: resolve each user-edited (service, building, level,
//! quantity) row against the table and sum capacity/cost over the rows that
//! resolve. One bad row never aborts the pass.

use serde::{Deserialize, Serialize};

use crate::data::table::DataTable;

fn default_level() -> u32 {
    1
}

/// One user-edited mix entry. Ephemeral: the caller owns the row list and
/// hands a snapshot to [evaluate_scenario] per recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRow {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub building: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub quantity: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Not found")]
    NotFound,
}

/// Per-row evaluation outcome, in input order. Capacity/cost fields stay
/// absent when the lookup failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub service: String,
    pub building: String,
    pub level: u32,
    pub quantity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_per_building: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_building: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_cost: Option<f64>,
    pub status: RowStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub rows: Vec<ScenarioOutcome>,
    pub total_capacity: f64,
    pub total_cost: f64,
}

/// Evaluate a snapshot of scenario rows against the table. Pure function:
/// output rows match input order, unresolved rows carry status "Not found"
/// and contribute exactly 0 to both totals.
pub fn evaluate_scenario(table: &DataTable, rows: &[ScenarioRow]) -> ScenarioReport {
    let mut outcomes = Vec::with_capacity(rows.len());
    let mut total_capacity = 0.0;
    let mut total_cost = 0.0;

    for row in rows {
        let service = row.service.trim().to_string();
        let building = row.building.trim().to_string();

        let Some(record) = table.find(&service, &building, row.level) else {
            outcomes.push(ScenarioOutcome {
                service,
                building,
                level: row.level,
                quantity: row.quantity,
                capacity_per_building: None,
                cost_per_building: None,
                row_capacity: None,
                row_cost: None,
                status: RowStatus::NotFound,
            });
            continue;
        };

        let row_capacity = record.capacity * row.quantity as f64;
        let row_cost = record.cum_cost * row.quantity as f64;
        total_capacity += row_capacity;
        total_cost += row_cost;

        outcomes.push(ScenarioOutcome {
            service,
            building,
            level: row.level,
            quantity: row.quantity,
            capacity_per_building: Some(record.capacity),
            cost_per_building: Some(record.cum_cost),
            row_capacity: Some(row_capacity),
            row_cost: Some(row_cost),
            status: RowStatus::Ok,
        });
    }

    ScenarioReport {
        rows: outcomes,
        total_capacity,
        total_cost,
    }
}
