//! Ceiling sizing: minimum building count to cover a demand figure.

use serde::Serialize;

/// Result of sizing one building type against a demand figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sizing {
    pub count: u64,
    pub spare: f64,
}

/// Minimum integer count of buildings with `capacity` throughput each that
/// covers `demand`, plus the spare capacity that count leaves over.
///
/// A zero, negative, or non-finite capacity cannot be sized and returns a
/// count of 0; so does a non-positive demand. The ceiling is taken on the
/// exact real quotient, never on a rounded intermediate.
pub fn buildings_needed(demand: f64, capacity: f64) -> Sizing {
    if !capacity.is_finite() || capacity <= 0.0 || !demand.is_finite() || demand <= 0.0 {
        return Sizing {
            count: 0,
            spare: 0.0,
        };
    }

    let count = (demand / capacity).ceil() as u64;
    Sizing {
        count,
        spare: count as f64 * capacity - demand,
    }
}
