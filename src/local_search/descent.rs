//! Local search driver chaining the improvement operators.
//!
//! Each round runs 2-opt on every route, then relocate, then 2-opt*. The
//! descent stops at a local optimum (a round with no change), after
//! `local_search_iterations` rounds, or when the budget runs out.

use tracing::debug;

use super::{exchange_improve, relocate_improve, two_opt_improve};
use crate::compile::CompiledGraph;
use crate::error::SolveError;
use crate::search::{SearchBudget, SearchParameters};

/// Improves feasible `routes` (indexed by vehicle) in place.
///
/// Returns the number of rounds that changed the solution. Running out of
/// time is not an error here: the routes hold the best solution found so
/// far, which is always feasible. Cancellation is reported as
/// [`SolveError::Cancelled`].
///
/// # Examples
///
/// ```
/// use vrp_engine::models::ModelBuilder;
/// use vrp_engine::compile::compile;
/// use vrp_engine::local_search::improve;
/// use vrp_engine::search::{SearchBudget, SearchParameters};
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
/// let mut routes = vec![vec![2, 1, 3]];
/// let rounds = improve(&graph, &mut routes, &SearchParameters::default(), &SearchBudget::unlimited()).unwrap();
/// assert!(rounds >= 1);
/// assert_eq!(graph.route_cost(&routes[0]), 6);
/// ```
pub fn improve(
    graph: &CompiledGraph,
    routes: &mut [Vec<usize>],
    params: &SearchParameters,
    budget: &SearchBudget,
) -> Result<usize, SolveError> {
    let mut rounds = 0;

    for round in 0..params.local_search_iterations {
        match budget.check() {
            Ok(()) => {}
            Err(SolveError::Timeout { elapsed }) => {
                debug!(round, ?elapsed, "local search stopped by time limit");
                break;
            }
            Err(e) => return Err(e),
        }

        let mut changed = false;
        for (vehicle, route) in routes.iter_mut().enumerate() {
            changed |= two_opt_improve(graph, vehicle, route, budget);
        }
        changed |= relocate_improve(graph, routes, params.parallel_neighborhoods, budget);
        changed |= exchange_improve(graph, routes, budget);

        if !changed {
            debug!(round, "local optimum reached");
            break;
        }
        rounds += 1;
    }

    if budget.check() == Err(SolveError::Cancelled) {
        return Err(SolveError::Cancelled);
    }
    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use crate::models::ModelBuilder;
    use crate::search::CancellationToken;

    fn line_rows(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect()
    }

    #[test]
    fn test_zero_iterations_is_noop() {
        let model = ModelBuilder::new(line_rows(4)).build().expect("valid");
        let graph = compile(&model, false, false).expect("compiles");
        let mut routes = vec![vec![2, 1, 3]];
        let params = SearchParameters::default().with_local_search_iterations(0);
        let rounds =
            improve(&graph, &mut routes, &params, &SearchBudget::unlimited()).expect("ok");
        assert_eq!(rounds, 0);
        assert_eq!(routes, vec![vec![2, 1, 3]]);
    }

    #[test]
    fn test_cancelled_before_start() {
        let model = ModelBuilder::new(line_rows(4)).build().expect("valid");
        let graph = compile(&model, false, false).expect("compiles");
        let token = CancellationToken::new();
        token.cancel();
        let budget = SearchBudget::new(None, token);
        let mut routes = vec![vec![2, 1, 3]];
        assert_eq!(
            improve(&graph, &mut routes, &SearchParameters::default(), &budget),
            Err(SolveError::Cancelled)
        );
    }

    #[test]
    fn test_expired_budget_keeps_routes() {
        let model = ModelBuilder::new(line_rows(4)).build().expect("valid");
        let graph = compile(&model, false, false).expect("compiles");
        let budget = SearchBudget::new(
            Some(std::time::Duration::ZERO),
            CancellationToken::new(),
        );
        let mut routes = vec![vec![2, 1, 3]];
        let rounds =
            improve(&graph, &mut routes, &SearchParameters::default(), &budget).expect("ok");
        assert_eq!(rounds, 0);
        assert_eq!(routes, vec![vec![2, 1, 3]]);
    }

    #[test]
    fn test_multi_vehicle_descent_stays_feasible() {
        let model = ModelBuilder::new(line_rows(7))
            .demands(vec![0, 2, 2, 2, 2, 2, 2])
            .vehicle_capacities(vec![6, 6])
            .build()
            .expect("valid");
        let graph = compile(&model, true, false).expect("compiles");
        let mut routes = vec![vec![1, 6, 3], vec![5, 2, 4]];
        let before: i64 = routes.iter().map(|r| graph.route_cost(r)).sum();

        improve(&graph, &mut routes, &SearchParameters::default(), &SearchBudget::unlimited())
            .expect("ok");

        let after: i64 = routes.iter().map(|r| graph.route_cost(r)).sum();
        assert!(after < before);
        for (vehicle, route) in routes.iter().enumerate() {
            assert!(graph.is_feasible(vehicle, route));
        }
        let mut served: Vec<usize> = routes.iter().flatten().copied().collect();
        served.sort_unstable();
        assert_eq!(served, vec![1, 2, 3, 4, 5, 6]);
    }
}
