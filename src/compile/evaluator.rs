//! Integer arc cost and transit evaluators.
//!
//! The search works on an integer objective, so every floating-point
//! quantity derived from the distance matrix goes through a single
//! [`CostRounding`] mode before it reaches the solver.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;

/// How scaled distances are converted to integers.
///
/// # Examples
///
/// ```
/// use vrp_engine::compile::CostRounding;
///
/// assert_eq!(CostRounding::Round.apply(2.5), 3);
/// assert_eq!(CostRounding::Round.apply(2.49), 2);
/// assert_eq!(CostRounding::Truncate.apply(2.99), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostRounding {
    /// Round half away from zero.
    #[default]
    Round,
    /// Drop the fractional part, like an integer cast.
    Truncate,
}

impl CostRounding {
    pub fn apply(self, value: f64) -> i64 {
        match self {
            CostRounding::Round => value.round() as i64,
            CostRounding::Truncate => value.trunc() as i64,
        }
    }
}

/// Precomputed integer cost for every arc: `rounding(distance[i][j] * cost_per_km)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcCostEvaluator {
    costs: Vec<i64>,
    size: usize,
}

impl ArcCostEvaluator {
    pub fn from_matrix(distances: &DistanceMatrix, cost_per_km: f64, rounding: CostRounding) -> Self {
        Self {
            costs: distances
                .entries()
                .map(|(_, _, d)| rounding.apply(d * cost_per_km))
                .collect(),
            size: distances.size(),
        }
    }

    /// Cost of travelling the arc `from → to`.
    pub fn cost(&self, from: usize, to: usize) -> i64 {
        self.costs[from * self.size + to]
    }
}

/// Quantity a dimension accumulates when a vehicle travels an arc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitEvaluator {
    /// Depends only on the node being left (e.g. demand picked up there).
    Unary(Vec<i64>),
    /// Depends on both endpoints (e.g. travel time).
    Binary { values: Vec<i64>, size: usize },
}

impl TransitEvaluator {
    /// Integerized raw distances, not scaled by any cost factor.
    pub fn travel_time(distances: &DistanceMatrix, rounding: CostRounding) -> Self {
        TransitEvaluator::Binary {
            values: distances
                .entries()
                .map(|(_, _, d)| rounding.apply(d))
                .collect(),
            size: distances.size(),
        }
    }

    pub fn transit(&self, from: usize, to: usize) -> i64 {
        match self {
            TransitEvaluator::Unary(values) => values[from],
            TransitEvaluator::Binary { values, size } => values[from * size + to],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![vec![0.0, 2.4], vec![3.5, 0.0]]).expect("valid")
    }

    #[test]
    fn test_arc_cost_scaled_then_rounded() {
        let eval = ArcCostEvaluator::from_matrix(&matrix(), 1.5, CostRounding::Round);
        // 2.4 * 1.5 = 3.6 -> 4, 3.5 * 1.5 = 5.25 -> 5
        assert_eq!(eval.cost(0, 1), 4);
        assert_eq!(eval.cost(1, 0), 5);
        assert_eq!(eval.cost(0, 0), 0);
    }

    #[test]
    fn test_arc_cost_truncated() {
        let eval = ArcCostEvaluator::from_matrix(&matrix(), 1.5, CostRounding::Truncate);
        assert_eq!(eval.cost(0, 1), 3);
        assert_eq!(eval.cost(1, 0), 5);
    }

    #[test]
    fn test_zero_cost_factor() {
        let eval = ArcCostEvaluator::from_matrix(&matrix(), 0.0, CostRounding::Round);
        assert_eq!(eval.cost(0, 1), 0);
        assert_eq!(eval.cost(1, 0), 0);
    }

    #[test]
    fn test_travel_time_ignores_cost_factor() {
        let eval = TransitEvaluator::travel_time(&matrix(), CostRounding::Round);
        assert_eq!(eval.transit(0, 1), 2);
        assert_eq!(eval.transit(1, 0), 4);
    }

    #[test]
    fn test_unary_uses_from_node() {
        let eval = TransitEvaluator::Unary(vec![0, 7]);
        assert_eq!(eval.transit(1, 0), 7);
        assert_eq!(eval.transit(0, 1), 0);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(CostRounding::Round.apply(0.5), 1);
        assert_eq!(CostRounding::Round.apply(1.5), 2);
        assert_eq!(CostRounding::Truncate.apply(1.5), 1);
    }
}
