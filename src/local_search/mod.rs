//! Local search operators for improving routing solutions.
//!
//! - [`two_opt_improve`] — Intra-route 2-opt segment reversal
//! - [`relocate_improve`] — Intra- and inter-route customer relocation
//! - [`exchange_improve`] — Inter-route 2-opt* tail exchange
//! - [`improve`] — Descent chaining the three under a search budget
//!
//! Every operator works on customer sequences indexed by vehicle, applies
//! only strictly improving moves, and keeps every route feasible.

mod descent;
mod exchange;
mod relocate;
mod two_opt;

pub use descent::improve;
pub use exchange::exchange_improve;
pub use relocate::relocate_improve;
pub use two_opt::two_opt_improve;
