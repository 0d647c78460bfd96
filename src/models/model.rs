//! Immutable problem description and its builder.

use crate::distance::DistanceMatrix;
use crate::error::ValidationError;

use super::{TimeWindow, Vehicle};

/// Largest accepted arc distance and scaled arc cost.
///
/// Keeps every route cost and objective sum well inside `i64` for any
/// matrix that fits in memory.
pub const MAX_ARC_VALUE: f64 = 1e12;

/// Which optional constraint families a model carries data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModelFeatures {
    /// Demands and vehicle capacities are present (CVRP).
    pub capacity_constrained: bool,
    /// Per-node time windows are present (VRPTW).
    pub time_constrained: bool,
}

/// A validated routing problem: nodes, vehicles and the optional demand and
/// time window data.
///
/// Node `depot` is the shared start and end of every route; all other nodes
/// are customers that must be visited exactly once.
///
/// Build one with [`ModelBuilder`] or [`build_model`].
#[derive(Debug, Clone)]
pub struct Model {
    distances: DistanceMatrix,
    demands: Option<Vec<i64>>,
    vehicles: Vec<Vehicle>,
    time_windows: Option<Vec<TimeWindow>>,
    cost_per_km: f64,
    depot: usize,
}

impl Model {
    /// Number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.distances.size()
    }

    /// Number of vehicles in the fleet.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Depot node index.
    pub fn depot(&self) -> usize {
        self.depot
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn cost_per_km(&self) -> f64 {
        self.cost_per_km
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Demand at `node`, zero when the model has no demands.
    pub fn demand(&self, node: usize) -> i64 {
        self.demands.as_ref().map_or(0, |d| d[node])
    }

    pub fn demands(&self) -> Option<&[i64]> {
        self.demands.as_deref()
    }

    /// Time window of `node`, unbounded when the model has no time windows.
    pub fn time_window(&self, node: usize) -> TimeWindow {
        self.time_windows
            .as_ref()
            .map_or_else(TimeWindow::unbounded, |tw| tw[node])
    }

    pub fn time_windows(&self) -> Option<&[TimeWindow]> {
        self.time_windows.as_deref()
    }

    /// Capacity of each vehicle, if the fleet is capacitated.
    pub fn vehicle_capacities(&self) -> Option<Vec<i64>> {
        self.vehicles.iter().map(|v| v.capacity()).collect()
    }

    pub fn features(&self) -> ModelFeatures {
        ModelFeatures {
            capacity_constrained: self.vehicles.iter().all(|v| v.capacity().is_some()),
            time_constrained: self.time_windows.is_some(),
        }
    }

    /// Customer nodes (every node except the depot), in index order.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_nodes()).filter(move |&n| n != self.depot)
    }
}

/// Builder for [`Model`] that validates shape consistency on [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use vrp_engine::models::ModelBuilder;
///
/// let model = ModelBuilder::new(vec![
///     vec![0.0, 4.0, 6.0],
///     vec![4.0, 0.0, 3.0],
///     vec![6.0, 3.0, 0.0],
/// ])
/// .demands(vec![0, 2, 3])
/// .vehicle_capacities(vec![5, 5])
/// .cost_per_km(1.5)
/// .build()
/// .unwrap();
///
/// assert_eq!(model.num_nodes(), 3);
/// assert_eq!(model.num_vehicles(), 2);
/// assert!(model.features().capacity_constrained);
/// assert!(!model.features().time_constrained);
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    distance_rows: Vec<Vec<f64>>,
    demands: Option<Vec<i64>>,
    vehicle_capacities: Option<Vec<i64>>,
    time_windows: Option<Vec<(i64, i64)>>,
    cost_per_km: f64,
    depot: usize,
    num_vehicles: Option<usize>,
}

impl ModelBuilder {
    /// Starts a builder from distance matrix rows. Cost factor defaults to 1.
    pub fn new(distance_rows: Vec<Vec<f64>>) -> Self {
        Self {
            distance_rows,
            demands: None,
            vehicle_capacities: None,
            time_windows: None,
            cost_per_km: 1.0,
            depot: 0,
            num_vehicles: None,
        }
    }

    pub fn demands(mut self, demands: Vec<i64>) -> Self {
        self.demands = Some(demands);
        self
    }

    /// Sets one capacity per vehicle; the fleet size follows from its length.
    pub fn vehicle_capacities(mut self, capacities: Vec<i64>) -> Self {
        self.vehicle_capacities = Some(capacities);
        self
    }

    /// Sets one `(earliest, latest)` pair per node.
    pub fn time_windows(mut self, windows: Vec<(i64, i64)>) -> Self {
        self.time_windows = Some(windows);
        self
    }

    pub fn cost_per_km(mut self, cost_per_km: f64) -> Self {
        self.cost_per_km = cost_per_km;
        self
    }

    pub fn depot(mut self, depot: usize) -> Self {
        self.depot = depot;
        self
    }

    /// Sets the fleet size for an uncapacitated fleet.
    ///
    /// When capacities are also given the two must agree.
    pub fn num_vehicles(mut self, num_vehicles: usize) -> Self {
        self.num_vehicles = Some(num_vehicles);
        self
    }

    /// Validates all inputs and produces the immutable model.
    pub fn build(self) -> Result<Model, ValidationError> {
        let distances = DistanceMatrix::from_rows(self.distance_rows)?;
        let n = distances.size();

        if self.depot >= n {
            return Err(ValidationError::DepotOutOfRange {
                depot: self.depot,
                nodes: n,
            });
        }
        if !self.cost_per_km.is_finite() || self.cost_per_km < 0.0 {
            return Err(ValidationError::InvalidCostFactor {
                value: self.cost_per_km,
            });
        }

        if let Some((from, to, value)) = distances
            .entries()
            .map(|(from, to, d)| (from, to, d.max(d * self.cost_per_km)))
            .find(|&(_, _, value)| value > MAX_ARC_VALUE)
        {
            return Err(ValidationError::ArcOutOfRange {
                from,
                to,
                value,
                limit: MAX_ARC_VALUE,
            });
        }

        let vehicles = build_fleet(self.vehicle_capacities, self.num_vehicles)?;
        let capacitated = vehicles.iter().all(|v| v.capacity().is_some());

        if let Some(demands) = &self.demands {
            if !capacitated {
                return Err(ValidationError::MissingCapacities);
            }
            check_len("demands", demands.len(), n)?;
            if let Some((node, demand)) = demands.iter().copied().enumerate().find(|&(_, d)| d < 0) {
                return Err(ValidationError::NegativeDemand { node, demand });
            }
            if demands[self.depot] != 0 {
                return Err(ValidationError::DepotDemand {
                    demand: demands[self.depot],
                });
            }
        }

        let time_windows = self
            .time_windows
            .map(|windows| {
                check_len("time windows", windows.len(), n)?;
                windows
                    .into_iter()
                    .enumerate()
                    .map(|(node, (earliest, latest))| {
                        TimeWindow::new(earliest, latest).ok_or(
                            ValidationError::InvalidTimeWindow {
                                node,
                                earliest,
                                latest,
                            },
                        )
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Model {
            distances,
            demands: self.demands,
            vehicles,
            time_windows,
            cost_per_km: self.cost_per_km,
            depot: self.depot,
        })
    }
}

fn build_fleet(
    capacities: Option<Vec<i64>>,
    num_vehicles: Option<usize>,
) -> Result<Vec<Vehicle>, ValidationError> {
    match capacities {
        Some(capacities) => {
            if capacities.is_empty() {
                return Err(ValidationError::EmptyCapacities);
            }
            if let Some(requested) = num_vehicles {
                if requested != capacities.len() {
                    return Err(ValidationError::VehicleCountMismatch {
                        capacities: capacities.len(),
                        requested,
                    });
                }
            }
            capacities
                .into_iter()
                .enumerate()
                .map(|(id, capacity)| {
                    if capacity <= 0 {
                        Err(ValidationError::NonPositiveCapacity {
                            vehicle: id,
                            capacity,
                        })
                    } else {
                        Ok(Vehicle::new(id).with_capacity(capacity))
                    }
                })
                .collect()
        }
        None => {
            let count = num_vehicles.unwrap_or(1);
            if count == 0 {
                return Err(ValidationError::ZeroVehicles);
            }
            Ok((0..count).map(Vehicle::new).collect())
        }
    }
}

fn check_len(field: &'static str, len: usize, expected: usize) -> Result<(), ValidationError> {
    if len != expected {
        return Err(ValidationError::LengthMismatch {
            field,
            len,
            expected,
        });
    }
    Ok(())
}

/// Builds a model from raw inputs in one call.
///
/// The fleet size is the number of capacities when given, otherwise one.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::build_model;
///
/// let model = build_model(
///     vec![vec![0.0, 1.0], vec![1.0, 0.0]],
///     None,
///     None,
///     Some(vec![(0, 100), (0, 50)]),
///     2.0,
///     0,
/// )
/// .unwrap();
/// assert_eq!(model.num_vehicles(), 1);
/// assert!(model.features().time_constrained);
/// ```
pub fn build_model(
    distance_matrix: Vec<Vec<f64>>,
    demands: Option<Vec<i64>>,
    vehicle_capacities: Option<Vec<i64>>,
    time_windows: Option<Vec<(i64, i64)>>,
    cost_per_km: f64,
    depot: usize,
) -> Result<Model, ValidationError> {
    let mut builder = ModelBuilder::new(distance_matrix)
        .cost_per_km(cost_per_km)
        .depot(depot);
    if let Some(demands) = demands {
        builder = builder.demands(demands);
    }
    if let Some(capacities) = vehicle_capacities {
        builder = builder.vehicle_capacities(capacities);
    }
    if let Some(windows) = time_windows {
        builder = builder.time_windows(windows);
    }
    builder.build()
}
