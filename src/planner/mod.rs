pub mod demand;
pub mod plan;
pub mod scenario;
pub mod sizing;

pub use demand::{aggregate_demand, default_demand_table, DemandSummary};
pub use plan::{build_plan, max_level_selections, PlanReport, PlanRow, PlanSelection};
pub use scenario::{evaluate_scenario, RowStatus, ScenarioReport, ScenarioRow};
pub use sizing::{buildings_needed, Sizing};
