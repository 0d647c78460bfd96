//! # vrp-engine
//!
//! Vehicle routing solver engine for VRP, CVRP and VRPTW instances given as
//! a distance matrix with optional demands, vehicle capacities and time
//! windows.
//!
//! The pipeline is: validate inputs into a [`models::Model`], compile it into
//! a [`compile::CompiledGraph`] with integer arc costs and cumulative
//! dimensions, search for a feasible assignment with [`search::solve`], and
//! read routes and costs back with [`evaluation::extract_routes`].
//!
//! ```
//! use vrp_engine::compile::compile;
//! use vrp_engine::evaluation::extract_routes;
//! use vrp_engine::models::build_model;
//! use vrp_engine::search::solve;
//!
//! let model = build_model(
//!     vec![
//!         vec![0.0, 4.0, 6.0],
//!         vec![4.0, 0.0, 3.0],
//!         vec![6.0, 3.0, 0.0],
//!     ],
//!     Some(vec![0, 5, 5]),
//!     Some(vec![10, 10]),
//!     None,
//!     2.0,
//!     0,
//! )
//! .unwrap();
//! let graph = compile(&model, true, false).unwrap();
//! let plan = extract_routes(&graph, &solve(&graph).unwrap());
//!
//! assert_eq!(plan.routes[0].sequence, vec![0, 1, 2, 0]);
//! assert_eq!(plan.routes[1].sequence, vec![0, 0]);
//! assert_eq!(plan.total_cost, 26);
//! ```
//!
//! ## Modules
//!
//! - [`models`] — Validated model, vehicles, time windows, routes, solutions
//! - [`distance`] — Distance matrix
//! - [`compile`] — Arc cost evaluators and cumulative dimensions
//! - [`constructive`] — First-solution heuristics (path cheapest arc, cheapest insertion)
//! - [`local_search`] — Improvement operators (2-opt, relocate, 2-opt*)
//! - [`search`] — Solve pipeline, time limits, cancellation, worker threads
//! - [`evaluation`] — Route extraction and independent solution checking
//! - [`io`] — JSON request/response contract and text helpers
//! - [`error`] — Validation and solve errors

pub mod compile;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod local_search;
pub mod models;
pub mod search;
