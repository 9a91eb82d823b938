use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::registry::DataRegistry;
use crate::planner::demand::{aggregate_demand, default_demand_table};
use crate::planner::plan::{build_plan, PlanSelection};
use crate::planner::scenario::{evaluate_scenario, ScenarioRow};

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationErrorResponse {
    fn new(errors: Vec<ValidationIssue>) -> Self {
        ValidationErrorResponse {
            status: "error",
            message: "Validation failed",
            errors,
        }
    }
}

#[derive(Debug)]
pub enum RequestError {
    Parse(serde_json::Error),
    Validation(ValidationErrorResponse),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(_) => write!(f, "invalid request"),
        }
    }
}

impl std::error::Error for RequestError {}

pub fn health_payload(registry: &DataRegistry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "cityplan-api",
        "version": env!("CARGO_PKG_VERSION"),
        "records": registry.table().len(),
        "source": registry.source_path().display().to_string(),
        "loaded_at": registry.loaded_at().to_rfc3339(),
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildingListItem {
    pub building: String,
    pub max_level: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceListItem {
    pub service: String,
    pub buildings: Vec<BuildingListItem>,
}

pub fn services_payload(registry: &DataRegistry) -> Result<String, serde_json::Error> {
    let table = registry.table();
    let list: Vec<ServiceListItem> = table
        .services()
        .into_iter()
        .map(|service| {
            let buildings = table
                .buildings_for(&service)
                .into_iter()
                .map(|building| {
                    let max_level = table.max_level_for(&service, &building).unwrap_or(1);
                    BuildingListItem {
                        building,
                        max_level,
                    }
                })
                .collect();
            ServiceListItem { service, buildings }
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "services": list }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemandRequest {
    #[serde(default)]
    pub counts: HashMap<String, u64>,
    /// Override for the per-home multipliers; defaults to the reference table.
    pub per_home: Option<HashMap<String, f64>>,
}

pub fn demand_payload(body: &str) -> Result<String, RequestError> {
    let request: DemandRequest = serde_json::from_str(body).map_err(RequestError::Parse)?;

    if let Some(per_home) = &request.per_home {
        let mut bad: Vec<String> = per_home
            .iter()
            .filter(|(_, multiplier)| !multiplier.is_finite() || **multiplier <= 0.0)
            .map(|(category, multiplier)| {
                format!("'{category}' multiplier {multiplier} must be a positive number")
            })
            .collect();
        bad.sort();
        if !bad.is_empty() {
            return Err(RequestError::Validation(ValidationErrorResponse::new(
                vec![ValidationIssue {
                    field: "per_home",
                    messages: bad,
                }],
            )));
        }
    }

    let per_home = request.per_home.unwrap_or_else(default_demand_table);
    let summary = aggregate_demand(&request.counts, &per_home);
    serde_json::to_string_pretty(&summary).map_err(RequestError::Parse)
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequestSelection {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub building: String,
    /// Omitted level means the pair's max recorded level.
    pub level: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub total_demand: f64,
    #[serde(default)]
    pub selections: Vec<PlanRequestSelection>,
}

pub fn plan_payload(registry: &DataRegistry, body: &str) -> Result<String, RequestError> {
    let request: PlanRequest = serde_json::from_str(body).map_err(RequestError::Parse)?;

    let mut errors = Vec::new();
    if !request.total_demand.is_finite() || request.total_demand < 0.0 {
        errors.push(ValidationIssue {
            field: "total_demand",
            messages: vec!["must be a finite non-negative number".to_string()],
        });
    }
    let blank: Vec<String> = request
        .selections
        .iter()
        .enumerate()
        .filter(|(_, s)| s.service.trim().is_empty() || s.building.trim().is_empty())
        .map(|(index, _)| format!("selection[{index}] needs a non-empty service and building"))
        .collect();
    if !blank.is_empty() {
        errors.push(ValidationIssue {
            field: "selections",
            messages: blank,
        });
    }
    if !errors.is_empty() {
        return Err(RequestError::Validation(ValidationErrorResponse::new(
            errors,
        )));
    }

    let table = registry.table();
    let selections: Vec<PlanSelection> = request
        .selections
        .iter()
        .map(|s| {
            let level = s
                .level
                .or_else(|| table.max_level_for(&s.service, &s.building))
                .unwrap_or(1);
            PlanSelection {
                service: s.service.trim().to_string(),
                building: s.building.trim().to_string(),
                level,
            }
        })
        .collect();

    let report = build_plan(table, request.total_demand, &selections);
    serde_json::to_string_pretty(&report).map_err(RequestError::Parse)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioRequest {
    #[serde(default)]
    pub rows: Vec<ScenarioRow>,
}

pub fn scenario_payload(registry: &DataRegistry, body: &str) -> Result<String, RequestError> {
    let request: ScenarioRequest = serde_json::from_str(body).map_err(RequestError::Parse)?;
    let report = evaluate_scenario(registry.table(), &request.rows);
    serde_json::to_string_pretty(&report).map_err(RequestError::Parse)
}
