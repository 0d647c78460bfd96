//! Domain model types for vehicle routing problems.
//!
//! Provides the validated problem description ([`Model`]) built from raw
//! inputs, vehicles with optional capacities, per-node time windows, and the
//! route and solution types produced by a solve.

mod model;
mod route;
mod solution;
mod time_window;
mod vehicle;

pub use model::{build_model, Model, ModelBuilder, ModelFeatures, MAX_ARC_VALUE};
pub use route::Route;
pub use solution::Solution;
pub use time_window::TimeWindow;
pub use vehicle::Vehicle;
