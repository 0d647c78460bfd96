//! Search parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the initial solution is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSolutionStrategy {
    /// Extend each vehicle's path from the depot with the cheapest feasible
    /// next node until nothing fits, then move to the next vehicle.
    #[default]
    PathCheapestArc,
    /// Repeatedly insert the node with the globally cheapest feasible
    /// insertion over all vehicles and positions.
    ParallelCheapestInsertion,
    /// Path cheapest arc, falling back to cheapest insertion when it strands
    /// nodes.
    Automatic,
}

/// Parameters of one solve.
///
/// The defaults reproduce a construction-only search: path cheapest arc,
/// no local search, no time limit.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vrp_engine::search::{FirstSolutionStrategy, SearchParameters};
///
/// let params = SearchParameters::default()
///     .with_local_search(true)
///     .with_time_limit(Duration::from_secs(2));
/// assert_eq!(params.first_solution_strategy, FirstSolutionStrategy::PathCheapestArc);
/// assert!(params.local_search);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    pub first_solution_strategy: FirstSolutionStrategy,
    /// Run the improvement phase after construction.
    pub local_search: bool,
    /// Maximum number of improvement rounds.
    pub local_search_iterations: usize,
    pub time_limit: Option<Duration>,
    /// Evaluate relocate neighborhoods on the rayon pool.
    pub parallel_neighborhoods: bool,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            first_solution_strategy: FirstSolutionStrategy::PathCheapestArc,
            local_search: false,
            local_search_iterations: 100,
            time_limit: None,
            parallel_neighborhoods: true,
        }
    }
}

impl SearchParameters {
    pub fn with_first_solution_strategy(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution_strategy = strategy;
        self
    }

    pub fn with_local_search(mut self, enabled: bool) -> Self {
        self.local_search = enabled;
        self
    }

    pub fn with_local_search_iterations(mut self, iterations: usize) -> Self {
        self.local_search_iterations = iterations;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_parallel_neighborhoods(mut self, enabled: bool) -> Self {
        self.parallel_neighborhoods = enabled;
        self
    }
}
