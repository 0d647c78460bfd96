//! Customer relocation operator (intra- and inter-route).
//!
//! # Algorithm
//!
//! Tries moving each customer from its current position to every other
//! position, in its own route or in another vehicle's route. The move with
//! the largest cost decrease whose affected routes stay feasible for their
//! vehicles is applied, and the search repeats until no improving move
//! exists (best-improvement strategy).
//!
//! Source routes are scanned independently, optionally on the rayon pool.
//! The per-source winners are reduced on `(delta, from, from_pos, to,
//! to_pos)`, so the chosen move does not depend on thread scheduling.
//!
//! # Complexity
//!
//! O(n² × R) candidate moves per pass, each checked in O(n × D).
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use rayon::prelude::*;

use crate::compile::CompiledGraph;
use crate::search::SearchBudget;

/// A relocate move: take the customer at `from_pos` of route `from_route`
/// and insert it at `to_pos` of route `to_route` (positions taken after
/// removal when both routes are the same).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RelocateMove {
    delta: i64,
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
}

/// Applies relocate improvement to `routes`, indexed by vehicle.
///
/// Returns `true` if any customer was moved.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::ModelBuilder;
/// use vrp_engine::compile::compile;
/// use vrp_engine::local_search::relocate_improve;
/// use vrp_engine::search::SearchBudget;
///
/// let model = ModelBuilder::new(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ])
/// .num_vehicles(2)
/// .build()
/// .unwrap();
/// let graph = compile(&model, false, false).unwrap();
///
/// // Two separate round trips cost 2 + 4; one route serving both costs 4.
/// let mut routes = vec![vec![1], vec![2]];
/// assert!(relocate_improve(&graph, &mut routes, true, &SearchBudget::unlimited()));
/// let total: i64 = routes.iter().map(|r| graph.route_cost(r)).sum();
/// assert_eq!(total, 4);
/// ```
pub fn relocate_improve(
    graph: &CompiledGraph,
    routes: &mut [Vec<usize>],
    parallel: bool,
    budget: &SearchBudget,
) -> bool {
    let mut changed = false;

    while !budget.is_exhausted() {
        let current: &[Vec<usize>] = routes;
        let best = if parallel {
            (0..current.len())
                .into_par_iter()
                .filter_map(|from_r| best_move_from(graph, current, from_r))
                .min()
        } else {
            (0..current.len())
                .filter_map(|from_r| best_move_from(graph, current, from_r))
                .min()
        };

        match best {
            Some(mv) => {
                apply(routes, mv);
                changed = true;
            }
            None => break,
        }
    }

    changed
}

/// Best strictly improving feasible move taking a customer out of `from_r`.
fn best_move_from(
    graph: &CompiledGraph,
    routes: &[Vec<usize>],
    from_r: usize,
) -> Option<RelocateMove> {
    let source = &routes[from_r];
    let source_cost = graph.route_cost(source);
    let mut best: Option<RelocateMove> = None;

    for from_pos in 0..source.len() {
        let node = source[from_pos];
        let mut reduced = source.clone();
        reduced.remove(from_pos);
        let reduced_cost = graph.route_cost(&reduced);

        for (to_r, target) in routes.iter().enumerate() {
            let base = if to_r == from_r { &reduced } else { target };
            let base_cost = if to_r == from_r {
                source_cost
            } else {
                graph.route_cost(target)
            };

            for to_pos in 0..=base.len() {
                if to_r == from_r && to_pos == from_pos {
                    continue;
                }
                let mut trial = base.clone();
                trial.insert(to_pos, node);
                let delta = if to_r == from_r {
                    graph.route_cost(&trial) - base_cost
                } else {
                    reduced_cost + graph.route_cost(&trial) - source_cost - base_cost
                };
                if delta >= 0 {
                    continue;
                }

                let candidate = RelocateMove {
                    delta,
                    from_route: from_r,
                    from_pos,
                    to_route: to_r,
                    to_pos,
                };
                if best.is_some_and(|b| candidate >= b) {
                    continue;
                }
                let feasible = graph.is_feasible(to_r, &trial)
                    && (to_r == from_r || graph.is_feasible(from_r, &reduced));
                if feasible {
                    best = Some(candidate);
                }
            }
        }
    }

    best
}

fn apply(routes: &mut [Vec<usize>], mv: RelocateMove) {
    let node = routes[mv.from_route].remove(mv.from_pos);
    routes[mv.to_route].insert(mv.to_pos, node);
}
