//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions `i < j` in a route, reverse the segment
//! `[i..=j]`. The reversed route is accepted if its total cost is strictly
//! lower and every dimension stays feasible for the route's vehicle. Repeat
//! until no further improvement is found (first-improvement strategy).
//!
//! The whole route cost is recomputed for each candidate rather than a
//! four-arc delta, because the matrix may be asymmetric and reversing a
//! segment then changes the cost of every arc inside it.
//!
//! # Complexity
//!
//! O(n³) per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::compile::CompiledGraph;
use crate::search::SearchBudget;

/// Applies 2-opt improvement to the route of `vehicle` in place.
///
/// Returns `true` if the route was changed.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::ModelBuilder;
/// use vrp_engine::compile::compile;
/// use vrp_engine::local_search::two_opt_improve;
/// use vrp_engine::search::SearchBudget;
///
/// let model = ModelBuilder::new(vec![
///     vec![0.0, 1.0, 2.0, 3.0],
///     vec![1.0, 0.0, 1.0, 2.0],
///     vec![2.0, 1.0, 0.0, 1.0],
///     vec![3.0, 2.0, 1.0, 0.0],
/// ])
/// .build()
/// .unwrap();
/// let graph = compile(&model, false, false).unwrap();
///
/// // Suboptimal order: 1, 3, 2
/// let mut route = vec![1, 3, 2];
/// assert!(two_opt_improve(&graph, 0, &mut route, &SearchBudget::unlimited()));
/// assert_eq!(graph.route_cost(&route), 6); // optimal: 0→1→2→3→0
/// ```
pub fn two_opt_improve(
    graph: &CompiledGraph,
    vehicle: usize,
    route: &mut Vec<usize>,
    budget: &SearchBudget,
) -> bool {
    if route.len() < 2 {
        return false;
    }

    let mut current_cost = graph.route_cost(route);
    let mut changed = false;

    while !budget.is_exhausted() {
        match find_first_improvement(graph, vehicle, route, current_cost) {
            Some((candidate, cost)) => {
                *route = candidate;
                current_cost = cost;
                changed = true;
            }
            None => break,
        }
    }

    changed
}

fn find_first_improvement(
    graph: &CompiledGraph,
    vehicle: usize,
    route: &[usize],
    current_cost: i64,
) -> Option<(Vec<usize>, i64)> {
    let n = route.len();
    for i in 0..n - 1 {
        for j in i + 1..n {
            let mut candidate = route.to_vec();
            candidate[i..=j].reverse();
            let cost = graph.route_cost(&candidate);
            if cost < current_cost && graph.is_feasible(vehicle, &candidate) {
                return Some((candidate, cost));
            }
        }
    }
    None
}
