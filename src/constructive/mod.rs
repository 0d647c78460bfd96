//! Constructive heuristics for the initial solution.
//!
//! - [`path_cheapest_arc`] — Per-vehicle path extension by cheapest arc
//! - [`parallel_cheapest_insertion`] — Global cheapest insertion over all routes

mod cheapest_insertion;
mod path_cheapest_arc;

pub use cheapest_insertion::parallel_cheapest_insertion;
pub use path_cheapest_arc::path_cheapest_arc;
