//! Collaborator interfaces around the core pipeline.
//!
//! - [`SolveRequest`] / [`SolveResponse`] — JSON service contract
//! - [`respond`] / [`solve_request`] — Request in, routes or error out
//! - [`parse_matrix_rows`], [`parse_time_window`], [`render_plan`] — Text
//!   input fields and the human-readable summary

mod request;
mod response;
mod text;

pub use request::{ModelKind, SolveRequest};
pub use response::{respond, solve_request, ErrorCode, RequestError, RouteSummary, SolveResponse};
pub use text::{parse_matrix_rows, parse_time_window, render_plan, NO_SOLUTION_MESSAGE};
