//! Shared fixtures for the end-to-end tests.

use serde::Serialize;
use sskp_core::{Instance, InstanceError, InstanceRecord, Item};
use sskp_solvers::branch_and_bound::Solution;

/// Instance records bundled with the tests, in file order: `pair`, `single`,
/// and the 25-item `demo-25`.
pub const INSTANCES_JSON: &str = include_str!("../data/instances.json");

/// Optimal objective of `demo-25`.
pub const DEMO_OPTIMUM: f64 = 356.907_119_420_994_55;

/// Items selected in the optimum of `demo-25`.
pub const DEMO_SELECTED: [usize; 6] = [1, 4, 7, 15, 17, 23];

/// Parses the bundled instance records.
///
/// # Panics
///
/// Panics if the bundled JSON is malformed.
#[must_use]
pub fn records() -> Vec<InstanceRecord> {
    serde_json::from_str(INSTANCES_JSON).expect("bundled instances are valid JSON")
}

/// Returns the bundled record with the given id as an instance.
///
/// # Panics
///
/// Panics if no record has that id.
///
/// # Errors
///
/// Returns an error if the record fails instance validation.
pub fn bundled(id: &str) -> Result<Instance, InstanceError> {
    let record = records()
        .into_iter()
        .find(|record| record.id.as_deref() == Some(id))
        .unwrap_or_else(|| panic!("no bundled instance {id:?}"));
    Instance::try_from(record)
}

/// Two deterministic items where packing both pays despite the overflow.
#[must_use]
pub fn deterministic_pair() -> Instance {
    Instance::new(
        vec![Item::new(4.0, 0.0, 10.0), Item::new(6.0, 0.0, 9.0)],
        9.0,
        5.0,
    )
    .expect("valid instance")
}

/// One deterministic item that always fits.
#[must_use]
pub fn single_item() -> Instance {
    Instance::new(vec![Item::new(10.0, 0.0, 5.0)], 20.0, 1.0).expect("valid instance")
}

/// Best binary allocation and its objective, by enumeration over `2^n`
/// allocations. Ties keep the allocation enumerated first.
#[must_use]
pub fn brute_force(instance: &Instance) -> (f64, Vec<f64>) {
    let n = instance.len();
    let mut best = (f64::NEG_INFINITY, vec![0.0; n]);
    for mask in 0..1_u64 << n {
        let allocation: Vec<f64> = (0..n)
            .map(|i| if (mask >> i) & 1 == 1 { 1.0 } else { 0.0 })
            .collect();
        let objective = instance.evaluate(&allocation);
        if objective > best.0 {
            best = (objective, allocation);
        }
    }
    best
}

/// One row of a batch report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub instance_id: String,
    pub allocation: Option<Vec<f64>>,
    pub objective: Option<f64>,
    pub elapsed_secs: f64,
    pub node_count: usize,
    pub timed_out: bool,
}

impl ReportRow {
    #[must_use]
    pub fn new(instance_id: &str, solution: &Solution) -> Self {
        Self {
            instance_id: instance_id.to_string(),
            allocation: solution.allocation().map(<[f64]>::to_vec),
            objective: solution.incumbent.as_ref().map(|incumbent| incumbent.objective),
            elapsed_secs: solution.stats.elapsed.as_secs_f64(),
            node_count: solution.node_count(),
            timed_out: solution.timed_out(),
        }
    }
}
