//! Distance and travel time matrices.
//!
//! The same matrix feeds both arc costs (scaled by the cost factor) and
//! travel times (unscaled).

mod matrix;

pub use matrix::DistanceMatrix;
