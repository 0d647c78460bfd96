//! Search engine: budgets, parameters, and the solve pipeline.
//!
//! - [`solve`] / [`Solver`] — Construction plus optional local search
//! - [`spawn_solve`] — The same pipeline on a dedicated worker thread
//! - [`SearchBudget`] / [`CancellationToken`] — Time limit and cancellation

mod budget;
mod engine;
mod params;
mod worker;

pub use budget::{CancellationToken, SearchBudget};
pub use engine::{solve, Solver};
pub use params::{FirstSolutionStrategy, SearchParameters};
pub use worker::{spawn_solve, SolveHandle};
