//! Cumulative dimensions (capacity, time) and their propagation.
//!
//! # Semantics
//!
//! Along a route `start = n₀, n₁, …, nₖ, end` a dimension tracks one cumul
//! value per position:
//!
//! ```text
//! cumul(nᵢ₊₁) = cumul(nᵢ) + transit(nᵢ, nᵢ₊₁) + slack(nᵢ),   0 ≤ slack ≤ slack_max
//! ```
//!
//! Every cumul must lie in the node's range and in `[0, capacity(vehicle)]`.
//! The start cumul may be pinned to zero.
//!
//! # Algorithm
//!
//! The set of reachable cumul values at each position is an interval: adding
//! a transit plus a slack in `[0, slack_max]` to an interval yields an
//! interval, and intersecting with the node range keeps it one. Forward
//! propagation therefore decides feasibility in O(k). A backward pass then
//! picks a concrete value at each position: any value `c` admissible at
//! `nᵢ₊₁` satisfies `min(nᵢ) + t ≤ c ≤ max(nᵢ) + t + slack_max`, so
//! `min(max(nᵢ), c - t)` is always admissible at `nᵢ`.

use super::TransitEvaluator;

/// Closed integer interval of admissible cumul values.
///
/// # Examples
///
/// ```
/// use vrp_engine::compile::CumulRange;
///
/// let a = CumulRange::new(0, 10);
/// let b = CumulRange::new(5, 20);
/// assert_eq!(a.intersect(b), Some(CumulRange::new(5, 10)));
/// assert_eq!(a.intersect(CumulRange::new(11, 12)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulRange {
    pub min: i64,
    pub max: i64,
}

impl CumulRange {
    /// No bound at all.
    pub const ALL: CumulRange = CumulRange {
        min: i64::MIN,
        max: i64::MAX,
    };

    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Intersection of two ranges, `None` if empty.
    pub fn intersect(self, other: CumulRange) -> Option<CumulRange> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(CumulRange { min, max })
    }

    pub fn contains(self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A named cumulative resource tracked along every route.
///
/// # Examples
///
/// ```
/// use vrp_engine::compile::{CumulRange, Dimension, TransitEvaluator};
///
/// // Load picked up at each node, one vehicle of capacity 10, depot 0.
/// let capacity = Dimension::new(
///     "Capacity",
///     TransitEvaluator::Unary(vec![0, 4, 7]),
///     0,
///     vec![10],
///     true,
///     3,
/// );
/// assert!(capacity.propagate(0, 0, &[1]).is_some());
/// assert!(capacity.propagate(0, 0, &[1, 2]).is_none()); // 11 > 10
/// assert_eq!(capacity.schedule(0, 0, &[2]), Some(vec![0, 0, 7]));
/// ```
#[derive(Debug, Clone)]
pub struct Dimension {
    name: String,
    transit: TransitEvaluator,
    slack_max: i64,
    vehicle_capacities: Vec<i64>,
    fix_start_cumul_to_zero: bool,
    node_ranges: Vec<CumulRange>,
}

impl Dimension {
    /// Creates a dimension whose per-node ranges are initially unbounded.
    pub fn new(
        name: impl Into<String>,
        transit: TransitEvaluator,
        slack_max: i64,
        vehicle_capacities: Vec<i64>,
        fix_start_cumul_to_zero: bool,
        num_nodes: usize,
    ) -> Self {
        Self {
            name: name.into(),
            transit,
            slack_max,
            vehicle_capacities,
            fix_start_cumul_to_zero,
            node_ranges: vec![CumulRange::ALL; num_nodes],
        }
    }

    /// Restricts the cumul at `node` to `range`.
    ///
    /// For the depot this bounds both the start and the end of every route.
    pub fn set_cumul_range(&mut self, node: usize, range: CumulRange) {
        self.node_ranges[node] = range;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slack_max(&self) -> i64 {
        self.slack_max
    }

    pub fn capacity(&self, vehicle: usize) -> i64 {
        self.vehicle_capacities[vehicle]
    }

    pub fn node_range(&self, node: usize) -> CumulRange {
        self.node_ranges[node]
    }

    pub fn fixes_start_to_zero(&self) -> bool {
        self.fix_start_cumul_to_zero
    }

    pub fn transit(&self, from: usize, to: usize) -> i64 {
        self.transit.transit(from, to)
    }

    fn vehicle_range(&self, vehicle: usize) -> CumulRange {
        CumulRange::new(0, self.vehicle_capacities[vehicle])
    }

    /// Admissible cumul values when `vehicle` leaves the depot.
    pub fn start_range(&self, vehicle: usize, depot: usize) -> Option<CumulRange> {
        let range = self
            .node_ranges[depot]
            .intersect(self.vehicle_range(vehicle))?;
        if self.fix_start_cumul_to_zero {
            range.intersect(CumulRange::new(0, 0))
        } else {
            Some(range)
        }
    }

    /// Admissible cumul values at `to` given those at `from`.
    pub fn step(
        &self,
        vehicle: usize,
        from_range: CumulRange,
        from: usize,
        to: usize,
    ) -> Option<CumulRange> {
        let transit = self.transit(from, to);
        let reached = CumulRange::new(
            from_range.min.saturating_add(transit),
            from_range
                .max
                .saturating_add(transit)
                .saturating_add(self.slack_max),
        );
        reached
            .intersect(self.node_ranges[to])?
            .intersect(self.vehicle_range(vehicle))
    }

    /// Forward propagation over `depot, customers…, depot`.
    ///
    /// Returns one range per position, or `None` if some position has no
    /// admissible value.
    pub fn propagate(
        &self,
        vehicle: usize,
        depot: usize,
        customers: &[usize],
    ) -> Option<Vec<CumulRange>> {
        let mut ranges = Vec::with_capacity(customers.len() + 2);
        let mut current = self.start_range(vehicle, depot)?;
        let mut prev = depot;
        ranges.push(current);
        for &node in customers.iter().chain(std::iter::once(&depot)) {
            current = self.step(vehicle, current, prev, node)?;
            ranges.push(current);
            prev = node;
        }
        Some(ranges)
    }

    /// Concrete cumul value per position over `depot, customers…, depot`.
    ///
    /// The end takes its earliest admissible value; each earlier position
    /// takes the latest value that still reaches its successor, so slack is
    /// only consumed where a window forces it.
    pub fn schedule(&self, vehicle: usize, depot: usize, customers: &[usize]) -> Option<Vec<i64>> {
        let ranges = self.propagate(vehicle, depot, customers)?;
        let nodes: Vec<usize> = std::iter::once(depot)
            .chain(customers.iter().copied())
            .chain(std::iter::once(depot))
            .collect();

        let last = ranges.len() - 1;
        let mut values = vec![0; ranges.len()];
        values[last] = ranges[last].min;
        for k in (0..last).rev() {
            let transit = self.transit(nodes[k], nodes[k + 1]);
            values[k] = ranges[k].max.min(values[k + 1].saturating_sub(transit));
        }
        Some(values)
    }
}
