//! cityplan: planning calculator for city-builder service buildings.
//! Loads a workbook of per-service, per-building, per-level capacity and
//! cumulative cost data, sizes building counts against aggregate demand, and
//! evaluates hand-built scenario mixes.

pub mod cli;
pub mod data;
pub mod planner;
pub mod server;
