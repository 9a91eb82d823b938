use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::workbook::load_table;
use crate::planner::demand::{aggregate_demand, default_demand_table};
use crate::planner::plan::{build_plan, max_level_selections};
use crate::planner::scenario::{evaluate_scenario, ScenarioRow};
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Demand,
    Plan,
    Scenario,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("demand") => Some(Command::Demand),
        Some("plan") => Some(Command::Plan),
        Some("scenario") => Some(Command::Scenario),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Demand) => handle_demand(args),
        Some(Command::Plan) => handle_plan(args),
        Some(Command::Scenario) => handle_scenario(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: cityplan <serve|demand|plan|scenario|validate>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("CITYPLAN_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_demand(args: &[String]) -> i32 {
    let as_table = args.iter().any(|arg| arg == "--table");
    let mut counts: HashMap<String, u64> = HashMap::new();

    for arg in args.iter().skip(2).filter(|arg| *arg != "--table") {
        let Some((category, raw_count)) = arg.split_once('=') else {
            eprintln!("usage: cityplan demand [category=count ...] [--table]");
            return 2;
        };
        let Ok(count) = raw_count.trim().parse::<u64>() else {
            eprintln!("invalid count '{raw_count}' for category '{category}'");
            return 2;
        };
        counts.insert(category.trim().to_string(), count);
    }

    let summary = aggregate_demand(&counts, &default_demand_table());

    if as_table {
        println!("total_homes\ttotal_demand");
        println!("{}\t{}", summary.total_homes, summary.total_demand);
        return 0;
    }

    match serde_json::to_string_pretty(&summary) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize demand summary: {err}");
            1
        }
    }
}

fn handle_plan(args: &[String]) -> i32 {
    let positional: Vec<&String> = args.iter().skip(2).filter(|arg| *arg != "--table").collect();
    let (Some(path), Some(raw_demand)) = (positional.first(), positional.get(1)) else {
        eprintln!("usage: cityplan plan <workbook> <total_demand> [--table]");
        return 2;
    };
    let Ok(total_demand) = raw_demand.trim().parse::<f64>() else {
        eprintln!("invalid total_demand '{raw_demand}'");
        return 2;
    };
    let as_table = args.iter().any(|arg| arg == "--table");

    let table = match load_table(Path::new(path.as_str())) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("failed to load '{path}': {err}");
            return 1;
        }
    };

    // No explicit selections on the CLI: sweep every pair at its max level.
    let selections = max_level_selections(&table);
    let report = build_plan(&table, total_demand, &selections);

    if as_table {
        println!("service\tbuilding\tlevel\tcapacity\tneeded\tspare\tcost_per\ttotal_cost");
        for row in &report.rows {
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                row.service,
                row.building,
                row.level,
                row.capacity_per_building,
                row.buildings_needed,
                row.spare_capacity,
                row.cost_per_building,
                row.total_cost
            );
        }
        return 0;
    }

    match serde_json::to_string_pretty(&report) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize plan: {err}");
            1
        }
    }
}

/// Scenario file shape: either a bare row array or `{ "rows": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScenarioFile {
    Rows(Vec<ScenarioRow>),
    Wrapped { rows: Vec<ScenarioRow> },
}

fn handle_scenario(args: &[String]) -> i32 {
    let (Some(path), Some(rows_path)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: cityplan scenario <workbook> <rows.json>");
        return 2;
    };

    let table = match load_table(Path::new(path)) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("failed to load '{path}': {err}");
            return 1;
        }
    };

    let raw = match fs::read_to_string(rows_path) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("failed to read '{rows_path}': {err}");
            return 1;
        }
    };
    let rows = match serde_json::from_str::<ScenarioFile>(&raw) {
        Ok(ScenarioFile::Rows(rows)) | Ok(ScenarioFile::Wrapped { rows }) => rows,
        Err(err) => {
            eprintln!("failed to parse scenario rows: {err}");
            return 1;
        }
    };

    let report = evaluate_scenario(&table, &rows);
    match serde_json::to_string_pretty(&report) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize scenario report: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: cityplan validate <workbook>");
        return 2;
    };

    match load_table(Path::new(path)) {
        Ok(table) => {
            println!(
                "validation passed: {path} ({} records, {} services)",
                table.len(),
                table.services().len()
            );
            0
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}
