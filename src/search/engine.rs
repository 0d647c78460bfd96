//! The solve pipeline: construction, optional improvement, solution assembly.

use tracing::{debug, info, instrument, warn};

use super::{CancellationToken, FirstSolutionStrategy, SearchBudget, SearchParameters};
use crate::compile::CompiledGraph;
use crate::constructive::{parallel_cheapest_insertion, path_cheapest_arc};
use crate::error::SolveError;
use crate::local_search::improve;
use crate::models::{Route, Solution};

/// Runs searches over compiled graphs with fixed parameters.
///
/// A solver holds no state between solves besides its cancellation token,
/// so one solver can serve any number of graphs.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::ModelBuilder;
/// use vrp_engine::compile::CompiledGraph;
/// use vrp_engine::search::{SearchParameters, Solver};
///
/// let model = ModelBuilder::new(vec![
///     vec![0.0, 4.0, 6.0],
///     vec![4.0, 0.0, 3.0],
///     vec![6.0, 3.0, 0.0],
/// ])
/// .build()
/// .unwrap();
/// let graph = CompiledGraph::from_model(&model).unwrap();
///
/// let solver = Solver::new(SearchParameters::default().with_local_search(true));
/// let solution = solver.solve(&graph).unwrap();
/// assert_eq!(solution.objective(), 13);
/// assert_eq!(solution.routes()[0].sequence(), vec![0, 1, 2, 0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    params: SearchParameters,
    cancellation: CancellationToken,
}

impl Solver {
    pub fn new(params: SearchParameters) -> Self {
        Self {
            params,
            cancellation: CancellationToken::new(),
        }
    }

    /// Uses `token` to stop the search from elsewhere.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn params(&self) -> &SearchParameters {
        &self.params
    }

    /// A handle that cancels searches run by this solver.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Finds a feasible assignment of every customer to a vehicle route.
    ///
    /// Returns [`SolveError::Infeasible`] when construction cannot route
    /// every node, [`SolveError::Timeout`] when the time limit expires
    /// before a first solution exists, and [`SolveError::Cancelled`] once
    /// the token is cancelled. A time limit hit during local search returns
    /// the best solution found.
    #[instrument(
        skip_all,
        level = "debug",
        fields(
            nodes = graph.num_nodes(),
            vehicles = graph.num_vehicles(),
            strategy = ?self.params.first_solution_strategy,
        )
    )]
    pub fn solve(&self, graph: &CompiledGraph) -> Result<Solution, SolveError> {
        let budget = SearchBudget::new(self.params.time_limit, self.cancellation.clone());

        let mut routes = self.construct(graph, &budget).inspect_err(|e| {
            warn!(error = %e, elapsed = ?budget.elapsed(), "no first solution");
        })?;
        debug!(
            cost = total_cost(graph, &routes),
            elapsed = ?budget.elapsed(),
            "first solution"
        );

        if self.params.local_search {
            let rounds = improve(graph, &mut routes, &self.params, &budget)?;
            debug!(
                rounds,
                cost = total_cost(graph, &routes),
                elapsed = ?budget.elapsed(),
                "local search finished"
            );
        }

        debug_assert!(routes
            .iter()
            .enumerate()
            .all(|(vehicle, route)| graph.is_feasible(vehicle, route)));

        let solution = assemble(graph, routes);
        info!(
            objective = solution.objective(),
            used_vehicles = solution.num_used_vehicles(),
            elapsed = ?budget.elapsed(),
            "solution found"
        );
        Ok(solution)
    }

    fn construct(
        &self,
        graph: &CompiledGraph,
        budget: &SearchBudget,
    ) -> Result<Vec<Vec<usize>>, SolveError> {
        match self.params.first_solution_strategy {
            FirstSolutionStrategy::PathCheapestArc => path_cheapest_arc(graph, budget),
            FirstSolutionStrategy::ParallelCheapestInsertion => {
                parallel_cheapest_insertion(graph, budget)
            }
            FirstSolutionStrategy::Automatic => match path_cheapest_arc(graph, budget) {
                Err(SolveError::Infeasible) => {
                    debug!("path cheapest arc stranded nodes, trying cheapest insertion");
                    parallel_cheapest_insertion(graph, budget)
                }
                other => other,
            },
        }
    }
}

/// Solves `graph` with default parameters.
///
/// Equivalent to `Solver::default().solve(graph)`: path cheapest arc, no
/// local search, no time limit.
pub fn solve(graph: &CompiledGraph) -> Result<Solution, SolveError> {
    Solver::default().solve(graph)
}

fn total_cost(graph: &CompiledGraph, routes: &[Vec<usize>]) -> i64 {
    routes.iter().map(|route| graph.route_cost(route)).sum()
}

fn assemble(graph: &CompiledGraph, routes: Vec<Vec<usize>>) -> Solution {
    let routes = routes
        .into_iter()
        .enumerate()
        .map(|(vehicle, customers)| {
            let cost = graph.route_cost(&customers);
            Route::new(vehicle, graph.depot(), customers, cost)
        })
        .collect();
    Solution::new(routes)
}
