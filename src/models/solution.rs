//! Solution type.

use super::Route;

/// A complete feasible assignment: one route per vehicle plus the objective.
///
/// Only ever produced by a successful solve; infeasibility is reported as an
/// error instead of a partial solution.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::{Route, Solution};
///
/// let sol = Solution::new(vec![
///     Route::new(0, 0, vec![1, 2], 12),
///     Route::new(1, 0, vec![], 0),
/// ]);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 2);
/// assert_eq!(sol.objective(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    routes: Vec<Route>,
    objective: i64,
}

impl Solution {
    /// Creates a solution; the objective is the sum of route costs.
    pub fn new(routes: Vec<Route>) -> Self {
        let objective = routes.iter().map(Route::cost).sum();
        Self { routes, objective }
    }

    /// Returns the routes, indexed by vehicle.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes (one per vehicle, used or not).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total integer arc cost across all routes.
    pub fn objective(&self) -> i64 {
        self.objective
    }

    /// Total number of customers served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Number of vehicles with at least one customer.
    pub fn num_used_vehicles(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }
}
