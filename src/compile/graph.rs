//! Compiled routing graph: arc costs plus the active dimensions.

use tracing::debug;

use crate::error::ValidationError;
use crate::models::Model;

use super::{ArcCostEvaluator, CostRounding, CumulRange, Dimension, TransitEvaluator};

/// Name of the load dimension.
pub const CAPACITY_DIMENSION: &str = "Capacity";
/// Name of the time dimension.
pub const TIME_DIMENSION: &str = "Time";
/// Maximum waiting allowed before each arc of the time dimension.
pub const DEFAULT_TIME_SLACK_MAX: i64 = 30;
/// Upper bound of every time cumul: one operational day in minutes.
pub const DEFAULT_TIME_HORIZON: i64 = 1440;

/// Which dimensions to install and how to integerize the matrix.
///
/// # Examples
///
/// ```
/// use vrp_engine::compile::{CompileOptions, CostRounding};
///
/// let options = CompileOptions::default()
///     .with_capacity(true)
///     .with_rounding(CostRounding::Truncate);
/// assert!(options.use_capacity);
/// assert!(!options.use_time_windows);
/// assert_eq!(options.time_horizon, 1440);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub use_capacity: bool,
    pub use_time_windows: bool,
    pub rounding: CostRounding,
    pub time_slack_max: i64,
    pub time_horizon: i64,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            use_capacity: false,
            use_time_windows: false,
            rounding: CostRounding::default(),
            time_slack_max: DEFAULT_TIME_SLACK_MAX,
            time_horizon: DEFAULT_TIME_HORIZON,
        }
    }
}

impl CompileOptions {
    /// Enables every dimension the model has data for.
    pub fn for_model(model: &Model) -> Self {
        let features = model.features();
        Self::default()
            .with_capacity(features.capacity_constrained)
            .with_time_windows(features.time_constrained)
    }

    pub fn with_capacity(mut self, enabled: bool) -> Self {
        self.use_capacity = enabled;
        self
    }

    pub fn with_time_windows(mut self, enabled: bool) -> Self {
        self.use_time_windows = enabled;
        self
    }

    pub fn with_rounding(mut self, rounding: CostRounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_time_slack_max(mut self, slack_max: i64) -> Self {
        self.time_slack_max = slack_max;
        self
    }

    pub fn with_time_horizon(mut self, horizon: i64) -> Self {
        self.time_horizon = horizon;
        self
    }
}

/// Dimension state of a partial path: the admissible cumul range of every
/// dimension at the last node of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathState {
    last: usize,
    ranges: Vec<CumulRange>,
}

impl PathState {
    /// Last node of the path.
    pub fn last(&self) -> usize {
        self.last
    }
}

/// The searchable representation of a [`Model`].
///
/// Owns everything the search needs, so it can be shared across threads and
/// outlives the model it was compiled from.
///
/// # Examples
///
/// ```
/// use vrp_engine::models::ModelBuilder;
/// use vrp_engine::compile::compile;
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
///
/// let graph = compile(&model, true, false).unwrap();
/// assert_eq!(graph.route_cost(&[1, 2]), 9);
/// assert!(graph.is_feasible(0, &[1]));
/// assert!(!graph.is_feasible(0, &[1, 2])); // 6 > 5
/// ```
#[derive(Debug, Clone)]
pub struct CompiledGraph {
    num_nodes: usize,
    num_vehicles: usize,
    depot: usize,
    arc_costs: ArcCostEvaluator,
    dimensions: Vec<Dimension>,
    options: CompileOptions,
}

/// Compiles `model` with the requested dimensions and default settings.
pub fn compile(
    model: &Model,
    use_capacity: bool,
    use_time_windows: bool,
) -> Result<CompiledGraph, ValidationError> {
    CompiledGraph::new(
        model,
        CompileOptions::default()
            .with_capacity(use_capacity)
            .with_time_windows(use_time_windows),
    )
}

impl CompiledGraph {
    /// Compiles `model` according to `options`.
    ///
    /// Fails if a dimension is requested that the model has no data for.
    pub fn new(model: &Model, options: CompileOptions) -> Result<Self, ValidationError> {
        let features = model.features();
        let n = model.num_nodes();
        let num_vehicles = model.num_vehicles();
        let mut dimensions = Vec::new();

        if options.use_capacity {
            let capacities = model
                .vehicle_capacities()
                .filter(|_| features.capacity_constrained)
                .ok_or(ValidationError::FeatureUnavailable {
                    feature: CAPACITY_DIMENSION,
                })?;
            let demands = (0..n).map(|node| model.demand(node)).collect();
            dimensions.push(Dimension::new(
                CAPACITY_DIMENSION,
                TransitEvaluator::Unary(demands),
                0,
                capacities,
                true,
                n,
            ));
        }

        if options.use_time_windows {
            if !features.time_constrained {
                return Err(ValidationError::FeatureUnavailable {
                    feature: TIME_DIMENSION,
                });
            }
            let mut time = Dimension::new(
                TIME_DIMENSION,
                TransitEvaluator::travel_time(model.distances(), options.rounding),
                options.time_slack_max,
                vec![options.time_horizon; num_vehicles],
                false,
                n,
            );
            for node in 0..n {
                let window = model.time_window(node);
                time.set_cumul_range(node, CumulRange::new(window.earliest(), window.latest()));
            }
            dimensions.push(time);
        }

        debug!(
            nodes = n,
            vehicles = num_vehicles,
            dimensions = ?dimensions.iter().map(Dimension::name).collect::<Vec<_>>(),
            "compiled routing graph"
        );

        Ok(Self {
            num_nodes: n,
            num_vehicles,
            depot: model.depot(),
            arc_costs: ArcCostEvaluator::from_matrix(
                model.distances(),
                model.cost_per_km(),
                options.rounding,
            ),
            dimensions,
            options,
        })
    }

    /// Compiles with every dimension the model has data for.
    pub fn from_model(model: &Model) -> Result<Self, ValidationError> {
        Self::new(model, CompileOptions::for_model(model))
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Customer nodes (every node except the depot), in index order.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_nodes).filter(move |&n| n != self.depot)
    }

    /// Integer cost of the arc `from → to`.
    pub fn arc_cost(&self, from: usize, to: usize) -> i64 {
        self.arc_costs.cost(from, to)
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name() == name)
    }

    /// Cost of `depot → customers… → depot`; an unused vehicle costs 0.
    pub fn route_cost(&self, customers: &[usize]) -> i64 {
        if customers.is_empty() {
            return 0;
        }
        let mut cost = 0;
        let mut prev = self.depot;
        for &node in customers {
            cost += self.arc_cost(prev, node);
            prev = node;
        }
        cost + self.arc_cost(prev, self.depot)
    }

    /// Returns `true` if `vehicle` can serve `customers` in this order within
    /// every dimension's bounds.
    pub fn is_feasible(&self, vehicle: usize, customers: &[usize]) -> bool {
        self.dimensions
            .iter()
            .all(|d| d.propagate(vehicle, self.depot, customers).is_some())
    }

    /// State of an empty path for `vehicle`, `None` if even leaving the depot
    /// is impossible.
    pub fn start_state(&self, vehicle: usize) -> Option<PathState> {
        let ranges = self
            .dimensions
            .iter()
            .map(|d| d.start_range(vehicle, self.depot))
            .collect::<Option<Vec<_>>>()?;
        Some(PathState {
            last: self.depot,
            ranges,
        })
    }

    /// State after appending `to` to a path, `None` if infeasible.
    pub fn extend(&self, vehicle: usize, state: &PathState, to: usize) -> Option<PathState> {
        let ranges = self
            .dimensions
            .iter()
            .zip(&state.ranges)
            .map(|(d, &range)| d.step(vehicle, range, state.last, to))
            .collect::<Option<Vec<_>>>()?;
        Some(PathState { last: to, ranges })
    }

    /// Returns `true` if the path can return to the depot.
    pub fn can_close(&self, vehicle: usize, state: &PathState) -> bool {
        self.extend(vehicle, state, self.depot).is_some()
    }
}
