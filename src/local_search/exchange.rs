//! Inter-route exchange operator (2-opt*).
//!
//! # Algorithm
//!
//! The 2-opt* operator swaps tail segments between two routes.
//! Given routes R1 = [a₁, ..., aᵢ, aᵢ₊₁, ..., aₙ] and
//! R2 = [b₁, ..., bⱼ, bⱼ₊₁, ..., bₘ], produce:
//!
//! R1' = [a₁, ..., aᵢ, bⱼ₊₁, ..., bₘ]
//! R2' = [b₁, ..., bⱼ, aᵢ₊₁, ..., aₙ]
//!
//! Cuts may fall before the first customer, so a whole route can be handed
//! to another vehicle or appended to one. The best strictly improving pair
//! of cuts whose two routes stay feasible for their vehicles is applied.
//!
//! # Complexity
//!
//! O(n² × R²) candidate pairs per pass, each checked in O(n × D).
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use crate::compile::CompiledGraph;
use crate::search::SearchBudget;

/// Applies 2-opt* tail exchange to `routes`, indexed by vehicle.
///
/// Returns `true` if any pair of routes was changed.
pub fn exchange_improve(
    graph: &CompiledGraph,
    routes: &mut [Vec<usize>],
    budget: &SearchBudget,
) -> bool {
    if routes.len() < 2 {
        return false;
    }

    let mut changed = false;
    let mut improved = true;
    while improved && !budget.is_exhausted() {
        improved = false;

        for r1 in 0..routes.len() {
            for r2 in (r1 + 1)..routes.len() {
                if let Some((head1, head2)) = find_best_exchange(graph, routes, r1, r2) {
                    let tail1 = routes[r1].split_off(head1);
                    let tail2 = routes[r2].split_off(head2);
                    routes[r1].extend(tail2);
                    routes[r2].extend(tail1);
                    improved = true;
                    changed = true;
                }
            }
        }
    }

    changed
}

/// Best head lengths `(i, j)` to keep in routes `r1` and `r2`.
fn find_best_exchange(
    graph: &CompiledGraph,
    routes: &[Vec<usize>],
    r1: usize,
    r2: usize,
) -> Option<(usize, usize)> {
    let route1 = &routes[r1];
    let route2 = &routes[r2];
    let n1 = route1.len();
    let n2 = route2.len();
    let current = graph.route_cost(route1) + graph.route_cost(route2);

    let mut best: Option<(i64, usize, usize)> = None;

    for i in 0..=n1 {
        for j in 0..=n2 {
            if i == n1 && j == n2 {
                continue;
            }

            let new1: Vec<usize> = route1[..i].iter().chain(&route2[j..]).copied().collect();
            let new2: Vec<usize> = route2[..j].iter().chain(&route1[i..]).copied().collect();
            let delta = graph.route_cost(&new1) + graph.route_cost(&new2) - current;

            if delta >= 0 || best.is_some_and(|(b, _, _)| delta >= b) {
                continue;
            }
            if graph.is_feasible(r1, &new1) && graph.is_feasible(r2, &new2) {
                best = Some((delta, i, j));
            }
        }
    }

    best.map(|(_, i, j)| (i, j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use crate::models::ModelBuilder;

    /// Depot at 0, nodes 1 and 3 east (5, 6), nodes 2 and 4 west (-5, -6).
    fn east_west_rows() -> Vec<Vec<f64>> {
        let positions = [0.0_f64, 5.0, -5.0, 6.0, -6.0];
        positions
            .iter()
            .map(|a| positions.iter().map(|b| (a - b).abs()).collect())
            .collect()
    }

    fn total(graph: &CompiledGraph, routes: &[Vec<usize>]) -> i64 {
        routes.iter().map(|r| graph.route_cost(r)).sum()
    }

    #[test]
    fn test_exchange_single_route() {
        let model = ModelBuilder::new(east_west_rows()).build().expect("valid");
        let graph = compile(&model, false, false).expect("compiles");
        let mut routes = vec![vec![1, 2, 3, 4]];
        assert!(!exchange_improve(&graph, &mut routes, &SearchBudget::unlimited()));
    }

    #[test]
    fn test_exchange_fixes_interleaved_routes() {
        let model = ModelBuilder::new(east_west_rows())
            .num_vehicles(2)
            .build()
            .expect("valid");
        let graph = compile(&model, false, false).expect("compiles");
        let mut routes = vec![vec![1, 4], vec![3, 2]];
        assert_eq!(total(&graph, &routes), 44);

        assert!(exchange_improve(&graph, &mut routes, &SearchBudget::unlimited()));
        assert!(total(&graph, &routes) < 44);

        let mut served: Vec<usize> = routes.iter().flatten().copied().collect();
        served.sort_unstable();
        assert_eq!(served, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_exchange_respects_capacity() {
        // Every improving exchange puts three customers on one vehicle.
        let model = ModelBuilder::new(east_west_rows())
            .demands(vec![0, 10, 10, 10, 10])
            .vehicle_capacities(vec![20, 20])
            .build()
            .expect("valid");
        let graph = compile(&model, true, false).expect("compiles");
        let mut routes = vec![vec![1, 4], vec![3, 2]];
        assert!(!exchange_improve(&graph, &mut routes, &SearchBudget::unlimited()));
        assert_eq!(routes, vec![vec![1, 4], vec![3, 2]]);
    }
}
