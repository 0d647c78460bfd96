//! Solve response and the end-to-end request pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::SolveRequest;
use crate::compile::CompiledGraph;
use crate::error::{SolveError, ValidationError};
use crate::evaluation::{extract_routes, RoutePlan};
use crate::search::Solver;

/// Why a request produced no routes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Runs a request through validation, compilation, search and extraction.
pub fn solve_request(request: &SolveRequest) -> Result<RoutePlan, RequestError> {
    let model = request.to_model()?;
    let graph = CompiledGraph::new(&model, request.compile_options(&model))?;
    let solution = Solver::new(request.search_parameters()).solve(&graph)?;
    Ok(extract_routes(&graph, &solution))
}

/// Machine-readable failure code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Infeasible,
    InvalidInput,
    Timeout,
    Cancelled,
    Internal,
}

/// One vehicle's route in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub vehicle: usize,
    pub sequence: Vec<usize>,
    pub cost: i64,
}

/// Response body: routes and total cost, or an error code with a message.
///
/// # Examples
///
/// ```
/// use vrp_engine::io::{respond, SolveRequest};
///
/// let request = SolveRequest::new(vec![vec![0.0, 2.0], vec![2.0, 0.0]]);
/// let response = respond(&request);
/// assert_eq!(response.status(), 200);
/// assert_eq!(
///     serde_json::to_string(&response).unwrap(),
///     r#"{"routes":[{"vehicle":0,"sequence":[0,1,0],"cost":4}],"totalCost":4}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolveResponse {
    Solved {
        routes: Vec<RouteSummary>,
        #[serde(rename = "totalCost")]
        total_cost: i64,
    },
    Failed {
        error: ErrorCode,
        detail: String,
    },
}

impl SolveResponse {
    /// HTTP status for this response.
    pub fn status(&self) -> u16 {
        match self {
            SolveResponse::Solved { .. } => 200,
            SolveResponse::Failed {
                error: ErrorCode::Internal,
                ..
            } => 500,
            SolveResponse::Failed { .. } => 422,
        }
    }
}

impl From<&RoutePlan> for SolveResponse {
    fn from(plan: &RoutePlan) -> Self {
        SolveResponse::Solved {
            routes: plan
                .routes
                .iter()
                .map(|r| RouteSummary {
                    vehicle: r.vehicle_id,
                    sequence: r.sequence.clone(),
                    cost: r.cost,
                })
                .collect(),
            total_cost: plan.total_cost,
        }
    }
}

impl From<&RequestError> for SolveResponse {
    fn from(err: &RequestError) -> Self {
        let error = match err {
            RequestError::Invalid(_) => ErrorCode::InvalidInput,
            RequestError::Solve(SolveError::Infeasible) => ErrorCode::Infeasible,
            RequestError::Solve(SolveError::Timeout { .. }) => ErrorCode::Timeout,
            RequestError::Solve(SolveError::Cancelled) => ErrorCode::Cancelled,
            RequestError::Solve(SolveError::WorkerPanicked) => ErrorCode::Internal,
        };
        SolveResponse::Failed {
            error,
            detail: err.to_string(),
        }
    }
}

/// Answers a request with the response body a service would return.
pub fn respond(request: &SolveRequest) -> SolveResponse {
    match solve_request(request) {
        Ok(plan) => SolveResponse::from(&plan),
        Err(err) => {
            warn!(error = %err, "request failed");
            SolveResponse::from(&err)
        }
    }
}
