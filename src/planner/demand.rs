//! Demand aggregation: per-category home counts × per-home multipliers.

use std::collections::HashMap;

use serde::Serialize;

/// Aggregate demand for one recomputation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemandSummary {
    pub total_homes: u64,
    pub total_demand: f64,
}

/// Per-home demand multipliers of the reference deployment. Supplied to
/// [aggregate_demand] as data so tests and other deployments can swap it out.
pub fn default_demand_table() -> HashMap<String, f64> {
    [
        ("Regular RZ", 35.0),
        ("4-tier Homes", 30.0),
        ("Airport-Related", 40.0),
        ("Old Town", 2.0),
        ("Epic", 45.0),
        ("Regional Buildings", 45.0),
        ("Omega Buildings", 50.0),
    ]
    .into_iter()
    .map(|(name, per_home)| (name.to_string(), per_home))
    .collect()
}

/// Sum home counts and weighted demand. Every count joins `total_homes`;
/// only categories present in `per_home` join `total_demand` — unknown
/// categories are ignored, never an error.
pub fn aggregate_demand(counts: &HashMap<String, u64>, per_home: &HashMap<String, f64>) -> DemandSummary {
    let total_homes = counts.values().sum();
    let total_demand = counts
        .iter()
        .filter_map(|(category, count)| {
            per_home
                .get(category)
                .map(|multiplier| *count as f64 * multiplier)
        })
        .sum();

    DemandSummary {
        total_homes,
        total_demand,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{aggregate_demand, default_demand_table};

    #[test]
    fn empty_counts_aggregate_to_zero() {
        let summary = aggregate_demand(&HashMap::new(), &default_demand_table());
        assert_eq!(summary.total_homes, 0);
        assert_eq!(summary.total_demand, 0.0);
    }

    #[test]
    fn weighted_sum_over_known_categories() {
        let counts = HashMap::from([("Regular RZ".to_string(), 2)]);
        let per_home = HashMap::from([
            ("Regular RZ".to_string(), 35.0),
            ("Epic".to_string(), 45.0),
        ]);
        let summary = aggregate_demand(&counts, &per_home);
        assert_eq!(summary.total_homes, 2);
        assert_eq!(summary.total_demand, 70.0);
    }

    #[test]
    fn unknown_category_counts_homes_but_not_demand() {
        let counts = HashMap::from([
            ("Regular RZ".to_string(), 1),
            ("Mystery Zone".to_string(), 4),
        ]);
        let summary = aggregate_demand(&counts, &default_demand_table());
        assert_eq!(summary.total_homes, 5);
        assert_eq!(summary.total_demand, 35.0);
    }

    #[test]
    fn default_table_has_seven_categories() {
        assert_eq!(default_demand_table().len(), 7);
    }
}
