//! Route extraction: per-vehicle node sequences, costs and schedules.

use serde::Serialize;

use crate::compile::{CompiledGraph, CAPACITY_DIMENSION, TIME_DIMENSION};
use crate::models::Solution;

/// One visit of a planned route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    pub node: usize,
    /// Cumulative demand collected once this stop is served. `None` without
    /// a capacity dimension.
    pub load: Option<i64>,
    /// Time at which the vehicle is at this stop. `None` without a time
    /// dimension.
    pub arrival: Option<i64>,
}

/// The route of one vehicle, depot to depot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRoute {
    pub vehicle_id: usize,
    /// Node sequence starting and ending at the depot.
    pub sequence: Vec<usize>,
    /// Sum of integer arc costs along `sequence`.
    pub cost: i64,
    /// One entry per element of `sequence`.
    pub stops: Vec<Stop>,
}

/// Routes of every vehicle plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub routes: Vec<PlannedRoute>,
    pub total_cost: i64,
}

impl RoutePlan {
    /// Number of vehicles that serve at least one customer.
    pub fn num_used_vehicles(&self) -> usize {
        self.routes.iter().filter(|r| r.sequence.len() > 2).count()
    }
}

/// Reconstructs the depot-to-depot route of every vehicle in `solution`.
///
/// Costs are recomputed arc by arc from the graph, and each stop carries
/// the load and arrival time of a concrete schedule for the active
/// dimensions. Vehicles without customers get `[depot, depot]` at cost 0.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::ModelBuilder;
/// use vrp_engine::compile::compile;
/// use vrp_engine::evaluation::extract_routes;
/// use vrp_engine::search::solve;
///
/// let model = ModelBuilder::new(vec![
///     vec![0.0, 2.0, 4.0],
///     vec![2.0, 0.0, 3.0],
///     vec![4.0, 3.0, 0.0],
/// ])
/// .demands(vec![0, 3, 3])
/// .vehicle_capacities(vec![5, 5])
/// .build()
/// .unwrap();
/// let graph = compile(&model, true, false).unwrap();
/// let plan = extract_routes(&graph, &solve(&graph).unwrap());
///
/// assert_eq!(plan.routes[0].sequence, vec![0, 1, 0]);
/// assert_eq!(plan.routes[1].sequence, vec![0, 2, 0]);
/// assert_eq!(plan.total_cost, 4 + 8);
/// assert_eq!(plan.routes[0].stops[1].load, Some(3));
/// ```
pub fn extract_routes(graph: &CompiledGraph, solution: &Solution) -> RoutePlan {
    let capacity = graph.dimension(CAPACITY_DIMENSION);
    let time = graph.dimension(TIME_DIMENSION);
    let depot = graph.depot();

    let routes: Vec<PlannedRoute> = solution
        .routes()
        .iter()
        .map(|route| {
            let vehicle = route.vehicle_id();
            let customers = route.customers();
            let sequence = route.sequence();

            let cost = graph.route_cost(customers);

            let cumuls = capacity.and_then(|dim| dim.schedule(vehicle, depot, customers));
            let loads: Option<Vec<i64>> = cumuls.map(|values| {
                let last = values.len() - 1;
                (0..values.len()).map(|k| values[(k + 1).min(last)]).collect()
            });
            let arrivals = time.and_then(|dim| dim.schedule(vehicle, depot, customers));

            let stops = sequence
                .iter()
                .enumerate()
                .map(|(k, &node)| Stop {
                    node,
                    load: loads.as_ref().map(|values| values[k]),
                    arrival: arrivals.as_ref().map(|values| values[k]),
                })
                .collect();

            PlannedRoute {
                vehicle_id: vehicle,
                sequence,
                cost,
                stops,
            }
        })
        .collect();

    let total_cost = routes.iter().map(|r| r.cost).sum();
    RoutePlan { routes, total_cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::{compile, CompiledGraph};
    use crate::models::{ModelBuilder, Route};

    #[test]
    fn test_idle_vehicle_route() {
        let model = ModelBuilder::new(vec![vec![0.0, 3.0], vec![3.0, 0.0]])
            .num_vehicles(2)
            .build()
            .expect("valid");
        let graph = compile(&model, false, false).expect("compiles");
        let solution = Solution::new(vec![
            Route::new(0, 0, vec![1], 6),
            Route::new(1, 0, vec![], 0),
        ]);
        let plan = extract_routes(&graph, &solution);
        assert_eq!(plan.routes[1].sequence, vec![0, 0]);
        assert_eq!(plan.routes[1].cost, 0);
        assert_eq!(plan.total_cost, 6);
        assert_eq!(plan.num_used_vehicles(), 1);
        assert!(plan.routes[0].stops.iter().all(|s| s.load.is_none() && s.arrival.is_none()));
    }

    #[test]
    fn test_idle_vehicle_ignores_depot_diagonal() {
        let model = ModelBuilder::new(vec![vec![5.0, 3.0], vec![3.0, 0.0]])
            .num_vehicles(2)
            .build()
            .expect("valid");
        let graph = compile(&model, false, false).expect("compiles");
        let solution = crate::search::solve(&graph).expect("feasible");
        let plan = extract_routes(&graph, &solution);
        assert_eq!(plan.routes[0].sequence, vec![0, 1, 0]);
        assert_eq!(plan.routes[1].sequence, vec![0, 0]);
        assert_eq!(plan.routes[1].cost, 0);
        assert_eq!(plan.total_cost, solution.objective());
        assert_eq!(plan.total_cost, 6);
    }

    #[test]
    fn test_per_arc_rounding() {
        // 1.4 * 1.5 = 2.1 -> 2 per arc, not round(4.2) once.
        let model = ModelBuilder::new(vec![vec![0.0, 1.4], vec![1.4, 0.0]])
            .cost_per_km(1.5)
            .build()
            .expect("valid");
        let graph = compile(&model, false, false).expect("compiles");
        let solution = Solution::new(vec![Route::new(0, 0, vec![1], 4)]);
        let plan = extract_routes(&graph, &solution);
        assert_eq!(plan.routes[0].cost, 4);
    }

    #[test]
    fn test_loads_are_prefix_sums() {
        let rows = vec![
            vec![0.0, 1.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0, 1.0],
            vec![1.0, 1.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0, 0.0],
        ];
        let model = ModelBuilder::new(rows)
            .demands(vec![0, 2, 3, 4])
            .vehicle_capacities(vec![10])
            .build()
            .expect("valid");
        let graph = compile(&model, true, false).expect("compiles");
        let solution = Solution::new(vec![Route::new(0, 0, vec![3, 1, 2], 4)]);
        let plan = extract_routes(&graph, &solution);
        let loads: Vec<Option<i64>> = plan.routes[0].stops.iter().map(|s| s.load).collect();
        assert_eq!(
            loads,
            vec![Some(0), Some(4), Some(6), Some(9), Some(9)]
        );
    }

    #[test]
    fn test_arrivals_inside_windows() {
        let rows = vec![
            vec![0.0, 10.0, 20.0],
            vec![10.0, 0.0, 10.0],
            vec![20.0, 10.0, 0.0],
        ];
        let model = ModelBuilder::new(rows)
            .time_windows(vec![(0, 1440), (100, 120), (125, 140)])
            .build()
            .expect("valid");
        let graph = CompiledGraph::from_model(&model).expect("compiles");
        let solution = Solution::new(vec![Route::new(0, 0, vec![1, 2], 40)]);
        let plan = extract_routes(&graph, &solution);
        let arrivals: Vec<i64> = plan.routes[0]
            .stops
            .iter()
            .map(|s| s.arrival.expect("time dimension"))
            .collect();
        assert!((100..=120).contains(&arrivals[1]));
        assert!((125..=140).contains(&arrivals[2]));
        assert!(arrivals[2] - arrivals[1] >= 10);
        assert!(arrivals[3] - arrivals[2] >= 20);
    }
}
