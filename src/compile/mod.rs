//! Constraint graph compiler.
//!
//! Translates a [`Model`](crate::models::Model) into a [`CompiledGraph`]:
//! integer arc costs plus optional cumulative dimensions.
//!
//! - [`ArcCostEvaluator`] — `round(distance × cost_per_km)` per arc
//! - [`TransitEvaluator`] — unary (demand) or binary (travel time) transits
//! - [`Dimension`] — cumulative resource with slack, per-vehicle capacity and
//!   per-node ranges
//!
//! No search happens here.

mod dimension;
mod evaluator;
mod graph;

pub use dimension::{CumulRange, Dimension};
pub use evaluator::{ArcCostEvaluator, CostRounding, TransitEvaluator};
pub use graph::{
    compile, CompileOptions, CompiledGraph, PathState, CAPACITY_DIMENSION,
    DEFAULT_TIME_HORIZON, DEFAULT_TIME_SLACK_MAX, TIME_DIMENSION,
};
