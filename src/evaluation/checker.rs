//! Independent verification of a route plan against its model.

use crate::compile::{CompileOptions, CostRounding};
use crate::models::Model;

use super::RoutePlan;

/// Type of constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// A customer served by no route.
    UnvisitedNode {
        node: usize,
    },
    /// A customer served more than once across all routes.
    DuplicateVisit {
        node: usize,
        /// Number of times the node appears.
        count: usize,
    },
    /// A sequence that references a node outside the model.
    UnknownNode {
        vehicle: usize,
        node: usize,
    },
    /// A route for a vehicle the model does not have, or a second route for
    /// the same vehicle.
    InvalidVehicle {
        vehicle: usize,
    },
    /// A route that does not start and end at the depot, or passes through
    /// it in between.
    RouteEndpoint {
        vehicle: usize,
    },
    /// Cumulative demand above the vehicle's capacity.
    CapacityExceeded {
        vehicle: usize,
        /// Load after the stop where the capacity was first exceeded.
        load: i64,
        capacity: i64,
    },
    /// A stop whose time lies outside the node's window.
    TimeWindowViolated {
        vehicle: usize,
        node: usize,
        arrival: i64,
        earliest: i64,
        latest: i64,
    },
    /// Two consecutive stops closer in time than the travel time, or further
    /// apart than travel time plus the allowed wait.
    InvalidTransition {
        vehicle: usize,
        from: usize,
        to: usize,
        /// Time between the two stops minus the travel time.
        wait: i64,
    },
    /// A stop time outside `[0, horizon]`.
    HorizonExceeded {
        vehicle: usize,
        node: usize,
        arrival: i64,
    },
    /// Time windows are active but the route carries no schedule.
    MissingSchedule {
        vehicle: usize,
    },
    /// A route cost different from the sum of its arc costs.
    CostMismatch {
        vehicle: usize,
        reported: i64,
        expected: i64,
    },
    /// A total cost different from the sum of route costs.
    TotalCostMismatch {
        reported: i64,
        expected: i64,
    },
}

/// A constraint violation found in a route plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Checks route plans against a model without using the compiled graph.
///
/// Costs are recomputed from the raw matrix, loads from the raw demands, and
/// the reported arrival times are checked against the windows, travel times,
/// the waiting cap and the horizon.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::ModelBuilder;
/// use vrp_engine::compile::{CompileOptions, CompiledGraph};
/// use vrp_engine::evaluation::{extract_routes, SolutionChecker};
/// use vrp_engine::search::solve;
///
/// let model = ModelBuilder::new(vec![
///     vec![0.0, 5.0, 7.0],
///     vec![5.0, 0.0, 3.0],
///     vec![7.0, 3.0, 0.0],
/// ])
/// .demands(vec![0, 4, 4])
/// .vehicle_capacities(vec![8])
/// .build()
/// .unwrap();
/// let options = CompileOptions::for_model(&model);
/// let graph = CompiledGraph::new(&model, options).unwrap();
/// let plan = extract_routes(&graph, &solve(&graph).unwrap());
///
/// let checker = SolutionChecker::new(&model, options);
/// assert!(checker.check(&plan).is_empty());
/// ```
pub struct SolutionChecker<'a> {
    model: &'a Model,
    options: CompileOptions,
}

impl<'a> SolutionChecker<'a> {
    /// Creates a checker for plans solved with `options`.
    pub fn new(model: &'a Model, options: CompileOptions) -> Self {
        Self { model, options }
    }

    /// Returns every violation found in `plan`; empty means valid.
    pub fn check(&self, plan: &RoutePlan) -> Vec<Violation> {
        let mut violations = Vec::new();
        let num_nodes = self.model.num_nodes();
        let depot = self.model.depot();
        let mut visits = vec![0usize; num_nodes];
        let mut seen_vehicles = vec![false; self.model.num_vehicles()];

        for route in &plan.routes {
            let vehicle = route.vehicle_id;
            match seen_vehicles.get_mut(vehicle) {
                Some(seen) if !*seen => *seen = true,
                _ => {
                    violations.push(Violation::new(ViolationType::InvalidVehicle { vehicle }));
                    continue;
                }
            }

            if let Some(&node) = route.sequence.iter().find(|&&n| n >= num_nodes) {
                violations.push(Violation::new(ViolationType::UnknownNode { vehicle, node }));
                continue;
            }

            let seq = &route.sequence;
            let inner = if seq.len() >= 2 { &seq[1..seq.len() - 1] } else { &[][..] };
            if seq.len() < 2
                || seq[0] != depot
                || seq[seq.len() - 1] != depot
                || inner.contains(&depot)
            {
                violations.push(Violation::new(ViolationType::RouteEndpoint { vehicle }));
            }
            for &node in inner {
                visits[node] += 1;
            }

            let expected = self.sequence_cost(seq);
            if route.cost != expected {
                violations.push(Violation::new(ViolationType::CostMismatch {
                    vehicle,
                    reported: route.cost,
                    expected,
                }));
            }

            if self.options.use_capacity {
                self.check_capacity(vehicle, seq, &mut violations);
            }
            if self.options.use_time_windows {
                self.check_schedule(route, &mut violations);
            }
        }

        for node in self.model.customers() {
            match visits[node] {
                1 => {}
                0 => violations.push(Violation::new(ViolationType::UnvisitedNode { node })),
                count => {
                    violations.push(Violation::new(ViolationType::DuplicateVisit { node, count }))
                }
            }
        }

        let expected_total = plan
            .routes
            .iter()
            .fold(0i64, |total, r| total.saturating_add(r.cost));
        if plan.total_cost != expected_total {
            violations.push(Violation::new(ViolationType::TotalCostMismatch {
                reported: plan.total_cost,
                expected: expected_total,
            }));
        }

        violations
    }

    fn rounding(&self) -> CostRounding {
        self.options.rounding
    }

    /// Cost of a depot-to-depot sequence; an idle vehicle costs 0 whatever
    /// the depot diagonal holds.
    fn sequence_cost(&self, sequence: &[usize]) -> i64 {
        let depot = self.model.depot();
        if sequence.iter().all(|&node| node == depot) {
            return 0;
        }
        let distances = self.model.distances();
        let factor = self.model.cost_per_km();
        sequence
            .windows(2)
            .map(|arc| self.rounding().apply(distances.get(arc[0], arc[1]) * factor))
            .sum()
    }

    fn check_capacity(&self, vehicle: usize, sequence: &[usize], violations: &mut Vec<Violation>) {
        let Some(capacity) = self.model.vehicles()[vehicle].capacity() else {
            return;
        };
        let mut load = 0;
        for &node in sequence {
            load = self.model.demand(node).saturating_add(load);
            if load > capacity {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    vehicle,
                    load,
                    capacity,
                }));
                return;
            }
        }
    }

    fn check_schedule(&self, route: &super::PlannedRoute, violations: &mut Vec<Violation>) {
        let vehicle = route.vehicle_id;
        let arrivals: Option<Vec<i64>> = route.stops.iter().map(|s| s.arrival).collect();
        let arrivals = match arrivals {
            Some(a) if a.len() == route.sequence.len() => a,
            _ => {
                violations.push(Violation::new(ViolationType::MissingSchedule { vehicle }));
                return;
            }
        };

        let distances = self.model.distances();
        let horizon = self.options.time_horizon;
        let slack_max = self.options.time_slack_max;

        for (k, (&node, &arrival)) in route.sequence.iter().zip(&arrivals).enumerate() {
            let window = self.model.time_window(node);
            if !window.contains(arrival) {
                violations.push(Violation::new(ViolationType::TimeWindowViolated {
                    vehicle,
                    node,
                    arrival,
                    earliest: window.earliest(),
                    latest: window.latest(),
                }));
            }
            if arrival < 0 || arrival > horizon {
                violations.push(Violation::new(ViolationType::HorizonExceeded {
                    vehicle,
                    node,
                    arrival,
                }));
            }
            if k + 1 < arrivals.len() {
                let to = route.sequence[k + 1];
                let travel = self.rounding().apply(distances.get(node, to));
                let wait = arrivals[k + 1].saturating_sub(arrival).saturating_sub(travel);
                if !(0..=slack_max).contains(&wait) {
                    violations.push(Violation::new(ViolationType::InvalidTransition {
                        vehicle,
                        from: node,
                        to,
                        wait,
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{PlannedRoute, Stop};
    use crate::models::ModelBuilder;

    fn plain_route(vehicle_id: usize, sequence: Vec<usize>, cost: i64) -> PlannedRoute {
        let stops = sequence
            .iter()
            .map(|&node| Stop {
                node,
                load: None,
                arrival: None,
            })
            .collect();
        PlannedRoute {
            vehicle_id,
            sequence,
            cost,
            stops,
        }
    }

    fn square_rows() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 2.0, 2.0, 3.0],
            vec![2.0, 0.0, 1.0, 2.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![3.0, 2.0, 1.0, 0.0],
        ]
    }

    #[test]
    fn test_valid_plan() {
        let model = ModelBuilder::new(square_rows()).build().expect("valid");
        let checker = SolutionChecker::new(&model, CompileOptions::default());
        let plan = RoutePlan {
            routes: vec![plain_route(0, vec![0, 1, 2, 3, 0], 7)],
            total_cost: 7,
        };
        assert!(checker.check(&plan).is_empty());
    }

    #[test]
    fn test_unvisited_and_duplicate() {
        let model = ModelBuilder::new(square_rows())
            .num_vehicles(2)
            .build()
            .expect("valid");
        let checker = SolutionChecker::new(&model, CompileOptions::default());
        let plan = RoutePlan {
            routes: vec![
                plain_route(0, vec![0, 1, 2, 0], 5),
                plain_route(1, vec![0, 2, 0], 4),
            ],
            total_cost: 9,
        };
        let kinds: Vec<ViolationType> = checker.check(&plan).into_iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationType::DuplicateVisit { node: 2, count: 2 },
                ViolationType::UnvisitedNode { node: 3 },
            ]
        );
    }

    #[test]
    fn test_bad_endpoints_and_costs() {
        let model = ModelBuilder::new(square_rows()).build().expect("valid");
        let checker = SolutionChecker::new(&model, CompileOptions::default());
        let plan = RoutePlan {
            routes: vec![plain_route(0, vec![1, 2, 3, 0], 99)],
            total_cost: 100,
        };
        let kinds: Vec<ViolationType> = checker.check(&plan).into_iter().map(|v| v.kind).collect();
        assert!(kinds.contains(&ViolationType::RouteEndpoint { vehicle: 0 }));
        assert!(kinds.contains(&ViolationType::CostMismatch {
            vehicle: 0,
            reported: 99,
            expected: 5,
        }));
        assert!(kinds.contains(&ViolationType::TotalCostMismatch {
            reported: 100,
            expected: 99,
        }));
    }

    #[test]
    fn test_idle_route_costs_nothing() {
        let mut rows = square_rows();
        rows[0][0] = 4.0;
        let model = ModelBuilder::new(rows)
            .num_vehicles(2)
            .build()
            .expect("valid");
        let checker = SolutionChecker::new(&model, CompileOptions::default());
        let valid = RoutePlan {
            routes: vec![
                plain_route(0, vec![0, 1, 2, 3, 0], 7),
                plain_route(1, vec![0, 0], 0),
            ],
            total_cost: 7,
        };
        assert!(checker.check(&valid).is_empty());

        let priced_diagonal = RoutePlan {
            routes: vec![
                plain_route(0, vec![0, 1, 2, 3, 0], 7),
                plain_route(1, vec![0, 0], 4),
            ],
            total_cost: 11,
        };
        let kinds: Vec<ViolationType> = checker
            .check(&priced_diagonal)
            .into_iter()
            .map(|v| v.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![ViolationType::CostMismatch {
                vehicle: 1,
                reported: 4,
                expected: 0,
            }]
        );
    }

    #[test]
    fn test_capacity_prefix_sum() {
        let model = ModelBuilder::new(square_rows())
            .demands(vec![0, 4, 4, 4])
            .vehicle_capacities(vec![10])
            .build()
            .expect("valid");
        let checker = SolutionChecker::new(&model, CompileOptions::for_model(&model));
        let plan = RoutePlan {
            routes: vec![plain_route(0, vec![0, 1, 2, 3, 0], 7)],
            total_cost: 7,
        };
        let kinds: Vec<ViolationType> = checker.check(&plan).into_iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationType::CapacityExceeded {
                vehicle: 0,
                load: 12,
                capacity: 10,
            }]
        );
    }

    #[test]
    fn test_schedule_checks() {
        let model = ModelBuilder::new(square_rows())
            .time_windows(vec![(0, 1440), (10, 20), (0, 1440), (0, 1440)])
            .build()
            .expect("valid");
        let checker = SolutionChecker::new(&model, CompileOptions::for_model(&model));

        let mut route = plain_route(0, vec![0, 1, 2, 3, 0], 7);
        for (stop, arrival) in route.stops.iter_mut().zip([0, 25, 26, 27, 30]) {
            stop.arrival = Some(arrival);
        }
        let plan = RoutePlan {
            routes: vec![route],
            total_cost: 7,
        };
        let kinds: Vec<ViolationType> = checker.check(&plan).into_iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationType::TimeWindowViolated {
                    vehicle: 0,
                    node: 1,
                    arrival: 25,
                    earliest: 10,
                    latest: 20,
                },
            ]
        );

        let plan = RoutePlan {
            routes: vec![plain_route(0, vec![0, 1, 2, 3, 0], 7)],
            total_cost: 7,
        };
        let kinds: Vec<ViolationType> = checker.check(&plan).into_iter().map(|v| v.kind).collect();
        assert_eq!(kinds, vec![ViolationType::MissingSchedule { vehicle: 0 }]);
    }

    #[test]
    fn test_waiting_above_slack() {
        let model = ModelBuilder::new(square_rows())
            .time_windows(vec![(0, 1440), (0, 1440), (0, 1440), (0, 1440)])
            .build()
            .expect("valid");
        let checker = SolutionChecker::new(&model, CompileOptions::for_model(&model));
        let mut route = plain_route(0, vec![0, 1, 0], 4);
        for (stop, arrival) in route.stops.iter_mut().zip([0, 40, 42]) {
            stop.arrival = Some(arrival);
        }
        let plan = RoutePlan {
            routes: vec![route],
            total_cost: 4,
        };
        let kinds: Vec<ViolationType> = checker.check(&plan).into_iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationType::InvalidTransition {
                    vehicle: 0,
                    from: 0,
                    to: 1,
                    wait: 38,
                },
                ViolationType::UnvisitedNode { node: 2 },
                ViolationType::UnvisitedNode { node: 3 },
            ]
        );
    }
}
