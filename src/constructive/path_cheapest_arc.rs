//! Path-cheapest-arc constructive heuristic.
//!
//! # Algorithm
//!
//! Vehicles are processed in index order. Each starts an empty path at the
//! depot and repeatedly appends the unrouted node reached by the cheapest arc
//! from the path's last node, among those whose addition keeps every
//! dimension feasible for the whole path including the return to the depot.
//! When no node fits, the path is closed and the next vehicle starts.
//!
//! Ties on arc cost are broken by node index, so the result is deterministic.
//!
//! # Complexity
//!
//! O(n² log n × D) where D = number of dimensions: each extension sorts the
//! remaining candidates and checks them in O(D) each through incremental
//! dimension propagation.

use tracing::debug;

use crate::compile::{CompiledGraph, PathState};
use crate::error::SolveError;
use crate::search::SearchBudget;

/// Builds one customer sequence per vehicle using path cheapest arc.
///
/// Returns [`SolveError::Infeasible`] if some customer is left unrouted once
/// every vehicle's path is closed.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::ModelBuilder;
/// use vrp_engine::compile::compile;
/// use vrp_engine::constructive::path_cheapest_arc;
/// use vrp_engine::search::SearchBudget;
///
/// let model = ModelBuilder::new(vec![
///     vec![0.0, 1.0, 2.0, 3.0],
///     vec![1.0, 0.0, 1.0, 2.0],
///     vec![2.0, 1.0, 0.0, 1.0],
///     vec![3.0, 2.0, 1.0, 0.0],
/// ])
/// .demands(vec![0, 10, 10, 10])
/// .vehicle_capacities(vec![20, 20])
/// .build()
/// .unwrap();
/// let graph = compile(&model, true, false).unwrap();
///
/// let routes = path_cheapest_arc(&graph, &SearchBudget::unlimited()).unwrap();
/// assert_eq!(routes, vec![vec![1, 2], vec![3]]);
/// ```
pub fn path_cheapest_arc(
    graph: &CompiledGraph,
    budget: &SearchBudget,
) -> Result<Vec<Vec<usize>>, SolveError> {
    let mut routed = vec![false; graph.num_nodes()];
    routed[graph.depot()] = true;
    let mut remaining = graph.num_nodes() - 1;
    let mut routes = Vec::with_capacity(graph.num_vehicles());

    for vehicle in 0..graph.num_vehicles() {
        let mut path = Vec::new();

        if remaining > 0 {
            if let Some(mut state) = graph.start_state(vehicle) {
                loop {
                    budget.check()?;
                    match cheapest_feasible_successor(graph, vehicle, &state, &routed) {
                        Some((node, next_state)) => {
                            routed[node] = true;
                            remaining -= 1;
                            path.push(node);
                            state = next_state;
                        }
                        None => break,
                    }
                }
            }
        }

        debug!(vehicle, stops = path.len(), remaining, "closed path");
        routes.push(path);
    }

    if remaining > 0 {
        debug!(remaining, "path cheapest arc left nodes unrouted");
        return Err(SolveError::Infeasible);
    }
    if routes
        .iter()
        .enumerate()
        .any(|(vehicle, path)| path.is_empty() && !graph.is_feasible(vehicle, path))
    {
        return Err(SolveError::Infeasible);
    }

    Ok(routes)
}

/// Cheapest unrouted successor of the path's last node that keeps the path
/// closable, with the resulting state.
fn cheapest_feasible_successor(
    graph: &CompiledGraph,
    vehicle: usize,
    state: &PathState,
    routed: &[bool],
) -> Option<(usize, PathState)> {
    let last = state.last();
    let mut candidates: Vec<usize> = (0..routed.len()).filter(|&n| !routed[n]).collect();
    candidates.sort_by_key(|&n| (graph.arc_cost(last, n), n));

    candidates.into_iter().find_map(|node| {
        let next = graph.extend(vehicle, state, node)?;
        graph.can_close(vehicle, &next).then_some((node, next))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use crate::models::ModelBuilder;

    fn line_rows(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect()
    }

    #[test]
    fn test_single_vehicle_visits_all() {
        let model = ModelBuilder::new(line_rows(5)).build().expect("valid");
        let graph = compile(&model, false, false).expect("compiles");
        let routes = path_cheapest_arc(&graph, &SearchBudget::unlimited()).expect("feasible");
        assert_eq!(routes, vec![vec![1, 2, 3, 4]]);
    }

    #[test]
    fn test_only_depot() {
        let model = ModelBuilder::new(vec![vec![0.0]])
            .num_vehicles(2)
            .build()
            .expect("valid");
        let graph = compile(&model, false, false).expect("compiles");
        let routes = path_cheapest_arc(&graph, &SearchBudget::unlimited()).expect("feasible");
        assert_eq!(routes, vec![Vec::<usize>::new(), Vec::new()]);
    }

    #[test]
    fn test_capacity_opens_second_vehicle() {
        let model = ModelBuilder::new(line_rows(4))
            .demands(vec![0, 5, 5, 5])
            .vehicle_capacities(vec![10, 10])
            .build()
            .expect("valid");
        let graph = compile(&model, true, false).expect("compiles");
        let routes = path_cheapest_arc(&graph, &SearchBudget::unlimited()).expect("feasible");
        assert_eq!(routes, vec![vec![1, 2], vec![3]]);
    }

    #[test]
    fn test_skips_infeasible_cheapest_arc() {
        // Node 1 is closest but too heavy for vehicle 0.
        let model = ModelBuilder::new(line_rows(3))
            .demands(vec![0, 8, 2])
            .vehicle_capacities(vec![5, 10])
            .build()
            .expect("valid");
        let graph = compile(&model, true, false).expect("compiles");
        let routes = path_cheapest_arc(&graph, &SearchBudget::unlimited()).expect("feasible");
        assert_eq!(routes, vec![vec![2], vec![1]]);
    }

    #[test]
    fn test_infeasible_when_fleet_too_small() {
        let model = ModelBuilder::new(line_rows(4))
            .demands(vec![0, 5, 5, 5])
            .vehicle_capacities(vec![10])
            .build()
            .expect("valid");
        let graph = compile(&model, true, false).expect("compiles");
        assert_eq!(
            path_cheapest_arc(&graph, &SearchBudget::unlimited()),
            Err(SolveError::Infeasible)
        );
    }

    #[test]
    fn test_cancelled_budget() {
        let model = ModelBuilder::new(line_rows(4)).build().expect("valid");
        let graph = compile(&model, false, false).expect("compiles");
        let token = crate::search::CancellationToken::new();
        token.cancel();
        let budget = SearchBudget::new(None, token);
        assert_eq!(path_cheapest_arc(&graph, &budget), Err(SolveError::Cancelled));
    }
}
