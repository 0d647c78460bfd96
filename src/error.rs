//! Error types shared across the pipeline.

use std::time::Duration;

use thiserror::Error;

/// Malformed input, reported before any compilation or search happens.
///
/// Every variant names the rule that was violated along with the offending
/// index or value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("distance matrix is empty")]
    EmptyMatrix,
    #[error("distance matrix is not square: row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("distance[{from}][{to}] = {value} is not a finite non-negative number")]
    InvalidDistance { from: usize, to: usize, value: f64 },
    #[error("{field} has {len} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        len: usize,
        expected: usize,
    },
    #[error("vehicle capacities must not be empty")]
    EmptyCapacities,
    #[error("vehicle {vehicle} has capacity {capacity}, capacities must be positive")]
    NonPositiveCapacity { vehicle: usize, capacity: i64 },
    #[error("node {node} has negative demand {demand}")]
    NegativeDemand { node: usize, demand: i64 },
    #[error("depot demand must be 0, got {demand}")]
    DepotDemand { demand: i64 },
    #[error("demands were given without vehicle capacities")]
    MissingCapacities,
    #[error("node {node} has time window [{earliest}, {latest}] with earliest > latest")]
    InvalidTimeWindow {
        node: usize,
        earliest: i64,
        latest: i64,
    },
    #[error("arc {from} -> {to} has travel value {value}, above the limit of {limit}")]
    ArcOutOfRange {
        from: usize,
        to: usize,
        value: f64,
        limit: f64,
    },
    #[error("cost per km must be a finite non-negative number, got {value}")]
    InvalidCostFactor { value: f64 },
    #[error("depot index {depot} is out of range for {nodes} nodes")]
    DepotOutOfRange { depot: usize, nodes: usize },
    #[error("at least one vehicle is required")]
    ZeroVehicles,
    #[error("vehicle count {requested} does not match {capacities} capacities")]
    VehicleCountMismatch { capacities: usize, requested: usize },
    #[error("{field} is required for a {model} model")]
    MissingField {
        field: &'static str,
        model: &'static str,
    },
    #[error("model has no data for the {feature} dimension")]
    FeatureUnavailable { feature: &'static str },
    #[error("cannot parse {field} from {value:?}")]
    Parse { field: String, value: String },
}

/// A solve that did not produce a feasible solution.
///
/// These are expected outcomes rather than faults: callers branch on them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("no solution exists for the given inputs")]
    Infeasible,
    #[error("search budget exhausted after {elapsed:?} before a solution was found")]
    Timeout { elapsed: Duration },
    #[error("solve was cancelled")]
    Cancelled,
    #[error("solver worker terminated abnormally")]
    WorkerPanicked,
}
