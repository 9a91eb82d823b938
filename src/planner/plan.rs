//! Quick build plan: one sized row per chosen (service, building, level)
//! against the aggregated city demand.

use serde::{Deserialize, Serialize};

use crate::data::table::DataTable;
use crate::planner::sizing::buildings_needed;

/// One chosen utility per service. A missing level means "max level for the
/// pair", resolved by the caller (the UI default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSelection {
    pub service: String,
    pub building: String,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRow {
    pub service: String,
    pub building: String,
    pub level: u32,
    pub capacity_per_building: f64,
    pub buildings_needed: u64,
    pub spare_capacity: f64,
    pub cost_per_building: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    pub total_demand: f64,
    pub rows: Vec<PlanRow>,
    pub total_buildings: u64,
    pub total_cost: f64,
}

/// Size each selection against `total_demand`. A selection whose lookup
/// fails sizes with zero capacity, which yields zero buildings and zero
/// cost rather than an error.
pub fn build_plan(
    table: &DataTable,
    total_demand: f64,
    selections: &[PlanSelection],
) -> PlanReport {
    let mut rows = Vec::with_capacity(selections.len());
    let mut total_buildings = 0;
    let mut total_cost = 0.0;

    for selection in selections {
        let record = table.find(&selection.service, &selection.building, selection.level);
        let capacity = record.map(|r| r.capacity).unwrap_or(0.0);
        let cost = record.map(|r| r.cum_cost).unwrap_or(0.0);

        let sizing = buildings_needed(total_demand, capacity);
        let row_total_cost = sizing.count as f64 * cost;
        total_buildings += sizing.count;
        total_cost += row_total_cost;

        rows.push(PlanRow {
            service: selection.service.trim().to_string(),
            building: selection.building.trim().to_string(),
            level: selection.level,
            capacity_per_building: capacity,
            buildings_needed: sizing.count,
            spare_capacity: sizing.spare,
            cost_per_building: cost,
            total_cost: row_total_cost,
        });
    }

    PlanReport {
        total_demand,
        rows,
        total_buildings,
        total_cost,
    }
}

/// Default plan sweep: every (service, building) pair at its max recorded
/// level. What the CLI sizes when no explicit selections are given.
pub fn max_level_selections(table: &DataTable) -> Vec<PlanSelection> {
    let mut selections = Vec::new();
    for service in table.services() {
        for building in table.buildings_for(&service) {
            if let Some(level) = table.max_level_for(&service, &building) {
                selections.push(PlanSelection {
                    service: service.clone(),
                    building,
                    level,
                });
            }
        }
    }
    selections
}
