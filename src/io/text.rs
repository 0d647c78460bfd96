//! Text forms used by interactive front ends: comma-separated input fields
//! and the human-readable result summary.

use crate::error::ValidationError;
use crate::evaluation::RoutePlan;

/// Shown when a request has no solution.
pub const NO_SOLUTION_MESSAGE: &str = "No solution found for the given inputs.";

/// Parses matrix rows of comma-separated numbers.
///
/// Shape is not checked here; [`ModelBuilder`](crate::models::ModelBuilder)
/// rejects non-square matrices.
///
/// # Examples
///
/// ```
/// use vrp_engine::io::parse_matrix_rows;
///
/// let rows = parse_matrix_rows(&["0, 2.5", "2.5,0"]).unwrap();
/// assert_eq!(rows, vec![vec![0.0, 2.5], vec![2.5, 0.0]]);
/// assert!(parse_matrix_rows(&["0,x"]).is_err());
/// ```
pub fn parse_matrix_rows<S: AsRef<str>>(rows: &[S]) -> Result<Vec<Vec<f64>>, ValidationError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            row.as_ref()
                .trim()
                .split(',')
                .map(|token| {
                    token.trim().parse::<f64>().map_err(|_| ValidationError::Parse {
                        field: format!("distance row {}", i),
                        value: token.trim().to_string(),
                    })
                })
                .collect()
        })
        .collect()
}

/// Parses an `"earliest,latest"` pair.
///
/// # Examples
///
/// ```
/// use vrp_engine::io::parse_time_window;
///
/// assert_eq!(parse_time_window(" 0, 100 ").unwrap(), (0, 100));
/// assert!(parse_time_window("0").is_err());
/// assert!(parse_time_window("0,1,2").is_err());
/// ```
pub fn parse_time_window(text: &str) -> Result<(i64, i64), ValidationError> {
    let invalid = || ValidationError::Parse {
        field: "time window".to_string(),
        value: text.to_string(),
    };
    let mut parts = text.trim().split(',').map(|p| p.trim().parse::<i64>());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(earliest)), Some(Ok(latest)), None) => Ok((earliest, latest)),
        _ => Err(invalid()),
    }
}

/// Renders the total cost and one line per vehicle, costs to two decimals.
///
/// # Examples
///
/// ```
/// use vrp_engine::io::{render_plan, solve_request, SolveRequest};
///
/// let plan = solve_request(&SolveRequest::new(vec![
///     vec![0.0, 2.0],
///     vec![2.0, 0.0],
/// ]))
/// .unwrap();
/// assert_eq!(
///     render_plan(&plan),
///     "Total cost: $4.00\nVehicle 0: Route: [0, 1, 0], Cost: $4.00\n"
/// );
/// ```
pub fn render_plan(plan: &RoutePlan) -> String {
    let mut out = format!("Total cost: ${:.2}\n", plan.total_cost as f64);
    for route in &plan.routes {
        out.push_str(&format!(
            "Vehicle {}: Route: {:?}, Cost: ${:.2}\n",
            route.vehicle_id, route.sequence, route.cost as f64
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::PlannedRoute;

    #[test]
    fn test_parse_rows_reports_position() {
        let err = parse_matrix_rows(&["0,1", "1,abc"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Parse {
                field: "distance row 1".to_string(),
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rows_owned_strings() {
        let rows = vec!["0,1,2".to_string(), "1,0,1".to_string(), "2,1,0".to_string()];
        let parsed = parse_matrix_rows(&rows).expect("numeric");
        assert_eq!(parsed[2], vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_parse_time_window_rejects_floats() {
        assert!(parse_time_window("0.5,10").is_err());
        assert_eq!(parse_time_window("-5,10").expect("ints"), (-5, 10));
    }

    #[test]
    fn test_render_idle_vehicle() {
        let plan = RoutePlan {
            routes: vec![
                PlannedRoute {
                    vehicle_id: 0,
                    sequence: vec![0, 2, 1, 0],
                    cost: 17,
                    stops: Vec::new(),
                },
                PlannedRoute {
                    vehicle_id: 1,
                    sequence: vec![0, 0],
                    cost: 0,
                    stops: Vec::new(),
                },
            ],
            total_cost: 17,
        };
        assert_eq!(
            render_plan(&plan),
            "Total cost: $17.00\n\
             Vehicle 0: Route: [0, 2, 1, 0], Cost: $17.00\n\
             Vehicle 1: Route: [0, 0], Cost: $0.00\n"
        );
    }
}
