//! Parallel cheapest insertion heuristic.
//!
//! # Algorithm
//!
//! All vehicles start with empty routes. At every step, each unrouted node is
//! tried at every position of every route; the feasible insertion with the
//! smallest cost increase is applied. Ties are broken by node, vehicle, then
//! position. Stops when every node is routed or none can be inserted.
//!
//! # Complexity
//!
//! O(n³ × V) insertion evaluations, each feasibility check O(n × D).
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An Analysis of
//! Several Heuristics for the Traveling Salesman Problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use tracing::debug;

use crate::compile::CompiledGraph;
use crate::error::SolveError;
use crate::search::SearchBudget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Insertion {
    delta: i64,
    node: usize,
    vehicle: usize,
    position: usize,
}

/// Builds one customer sequence per vehicle by cheapest insertion.
///
/// Unlike [`path_cheapest_arc`](super::path_cheapest_arc) the routes grow in
/// parallel, so a node that does not fit at the end of a path can still be
/// placed in the middle of another one.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::ModelBuilder;
/// use vrp_engine::compile::compile;
/// use vrp_engine::constructive::parallel_cheapest_insertion;
/// use vrp_engine::search::SearchBudget;
///
/// let model = ModelBuilder::new(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ])
/// .build()
/// .unwrap();
/// let graph = compile(&model, false, false).unwrap();
///
/// let routes = parallel_cheapest_insertion(&graph, &SearchBudget::unlimited()).unwrap();
/// assert_eq!(graph.route_cost(&routes[0]), 4);
/// ```
pub fn parallel_cheapest_insertion(
    graph: &CompiledGraph,
    budget: &SearchBudget,
) -> Result<Vec<Vec<usize>>, SolveError> {
    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); graph.num_vehicles()];
    if routes
        .iter()
        .enumerate()
        .any(|(vehicle, route)| !graph.is_feasible(vehicle, route))
    {
        return Err(SolveError::Infeasible);
    }

    let mut unrouted: Vec<usize> = graph.customers().collect();

    while !unrouted.is_empty() {
        budget.check()?;

        let best = cheapest_insertion(graph, &routes, &unrouted).ok_or_else(|| {
            debug!(remaining = unrouted.len(), "no feasible insertion left");
            SolveError::Infeasible
        })?;

        routes[best.vehicle].insert(best.position, best.node);
        unrouted.retain(|&n| n != best.node);
    }

    Ok(routes)
}

fn cheapest_insertion(
    graph: &CompiledGraph,
    routes: &[Vec<usize>],
    unrouted: &[usize],
) -> Option<Insertion> {
    let mut best: Option<Insertion> = None;

    for &node in unrouted {
        for (vehicle, route) in routes.iter().enumerate() {
            for position in 0..=route.len() {
                let candidate = Insertion {
                    delta: insertion_delta(graph, route, position, node),
                    node,
                    vehicle,
                    position,
                };
                if best.is_some_and(|b| candidate >= b) {
                    continue;
                }
                let mut trial = route.clone();
                trial.insert(position, node);
                if graph.is_feasible(vehicle, &trial) {
                    best = Some(candidate);
                }
            }
        }
    }

    best
}

/// Cost increase of inserting `node` at `position` of `route`.
pub(crate) fn insertion_delta(
    graph: &CompiledGraph,
    route: &[usize],
    position: usize,
    node: usize,
) -> i64 {
    let depot = graph.depot();
    if route.is_empty() {
        return graph.arc_cost(depot, node) + graph.arc_cost(node, depot);
    }
    let prev = if position == 0 { depot } else { route[position - 1] };
    let next = if position == route.len() {
        depot
    } else {
        route[position]
    };
    graph.arc_cost(prev, node) + graph.arc_cost(node, next) - graph.arc_cost(prev, next)
}
