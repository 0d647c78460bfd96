//! Route extraction and solution verification.
//!
//! - [`extract_routes`] — Depot-to-depot sequences, integer costs, schedules
//! - [`SolutionChecker`] — Re-checks a [`RoutePlan`] against the raw model

mod checker;
mod extractor;

pub use checker::{SolutionChecker, Violation, ViolationType};
pub use extractor::{extract_routes, PlannedRoute, RoutePlan, Stop};
