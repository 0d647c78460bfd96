//! JSON solve request.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compile::{CompileOptions, CostRounding};
use crate::error::ValidationError;
use crate::models::{Model, ModelBuilder};
use crate::search::{FirstSolutionStrategy, SearchParameters};

/// Problem family selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Plain routing: demands, capacities and time windows are ignored.
    #[serde(rename = "VRP")]
    Vrp,
    /// Capacitated: demands and capacities are required.
    #[serde(rename = "CVRP")]
    Cvrp,
    /// Capacitated with time windows: all three are required.
    #[serde(rename = "VRPTW")]
    Vrptw,
}

impl ModelKind {
    fn name(self) -> &'static str {
        match self {
            ModelKind::Vrp => "VRP",
            ModelKind::Cvrp => "CVRP",
            ModelKind::Vrptw => "VRPTW",
        }
    }

    fn uses_capacity(self) -> bool {
        matches!(self, ModelKind::Cvrp | ModelKind::Vrptw)
    }

    fn uses_time_windows(self) -> bool {
        matches!(self, ModelKind::Vrptw)
    }
}

/// Body of a solve request.
///
/// # Examples
///
/// ```
/// use vrp_engine::io::{ModelKind, SolveRequest};
///
/// let request: SolveRequest = serde_json::from_str(r#"{
///     "distanceMatrix": [[0, 5], [5, 0]],
///     "demands": [0, 3],
///     "vehicleCapacities": [10, 10],
///     "costPerKm": 1.5,
///     "modelType": "CVRP"
/// }"#).unwrap();
///
/// assert_eq!(request.model_type, Some(ModelKind::Cvrp));
/// let model = request.to_model().unwrap();
/// assert_eq!(model.num_vehicles(), 2);
/// assert!(request.compile_options(&model).use_capacity);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub distance_matrix: Vec<Vec<f64>>,
    pub demands: Option<Vec<i64>>,
    pub vehicle_capacities: Option<Vec<i64>>,
    /// `[earliest, latest]` per node.
    pub time_windows: Option<Vec<(i64, i64)>>,
    #[serde(default = "default_cost_per_km")]
    pub cost_per_km: f64,
    #[serde(default)]
    pub depot: usize,
    /// Fleet size when no capacities are given.
    pub num_vehicles: Option<usize>,
    pub model_type: Option<ModelKind>,
    #[serde(default)]
    pub rounding: CostRounding,
    pub time_limit_ms: Option<u64>,
    #[serde(default)]
    pub local_search: bool,
    #[serde(default)]
    pub first_solution_strategy: FirstSolutionStrategy,
}

fn default_cost_per_km() -> f64 {
    1.0
}

impl SolveRequest {
    /// A plain request over `distance_matrix` with every option at its default.
    pub fn new(distance_matrix: Vec<Vec<f64>>) -> Self {
        Self {
            distance_matrix,
            demands: None,
            vehicle_capacities: None,
            time_windows: None,
            cost_per_km: default_cost_per_km(),
            depot: 0,
            num_vehicles: None,
            model_type: None,
            rounding: CostRounding::default(),
            time_limit_ms: None,
            local_search: false,
            first_solution_strategy: FirstSolutionStrategy::default(),
        }
    }

    /// Validates the request into a [`Model`].
    ///
    /// With an explicit model type, fields that type does not use are
    /// dropped and fields it requires must be present.
    pub fn to_model(&self) -> Result<Model, ValidationError> {
        let mut builder = ModelBuilder::new(self.distance_matrix.clone())
            .cost_per_km(self.cost_per_km)
            .depot(self.depot);
        if let Some(count) = self.num_vehicles {
            builder = builder.num_vehicles(count);
        }

        let (demands, capacities, windows) = match self.model_type {
            None => (
                self.demands.clone(),
                self.vehicle_capacities.clone(),
                self.time_windows.clone(),
            ),
            Some(kind) => {
                let (demands, capacities) = if kind.uses_capacity() {
                    (
                        Some(required(kind, "demands", &self.demands)?),
                        Some(required(kind, "vehicleCapacities", &self.vehicle_capacities)?),
                    )
                } else {
                    (None, None)
                };
                let windows = if kind.uses_time_windows() {
                    Some(required(kind, "timeWindows", &self.time_windows)?)
                } else {
                    None
                };
                (demands, capacities, windows)
            }
        };

        if let Some(demands) = demands {
            builder = builder.demands(demands);
        }
        if let Some(capacities) = capacities {
            builder = builder.vehicle_capacities(capacities);
        }
        if let Some(windows) = windows {
            builder = builder.time_windows(windows);
        }
        builder.build()
    }

    /// Dimensions to install: those of the model type, or every one the
    /// model has data for.
    pub fn compile_options(&self, model: &Model) -> CompileOptions {
        let options = match self.model_type {
            Some(kind) => CompileOptions::default()
                .with_capacity(kind.uses_capacity())
                .with_time_windows(kind.uses_time_windows()),
            None => CompileOptions::for_model(model),
        };
        options.with_rounding(self.rounding)
    }

    pub fn search_parameters(&self) -> SearchParameters {
        let mut params = SearchParameters::default()
            .with_first_solution_strategy(self.first_solution_strategy)
            .with_local_search(self.local_search);
        if let Some(ms) = self.time_limit_ms {
            params = params.with_time_limit(Duration::from_millis(ms));
        }
        params
    }
}

fn required<T: Clone>(
    kind: ModelKind,
    field: &'static str,
    value: &Option<T>,
) -> Result<T, ValidationError> {
    value.clone().ok_or(ValidationError::MissingField {
        field,
        model: kind.name(),
    })
}
