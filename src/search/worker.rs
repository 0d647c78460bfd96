//! Running a solve on a dedicated thread.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::warn;

use super::{CancellationToken, SearchParameters, Solver};
use crate::compile::CompiledGraph;
use crate::error::SolveError;
use crate::models::Solution;

/// Handle to a solve running on its own thread.
#[derive(Debug)]
pub struct SolveHandle {
    handle: JoinHandle<Result<Solution, SolveError>>,
    cancellation: CancellationToken,
}

impl SolveHandle {
    /// Asks the search to stop; [`join`](Self::join) then returns
    /// [`SolveError::Cancelled`] unless the solve had already finished.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the solve to finish.
    pub fn join(self) -> Result<Solution, SolveError> {
        self.handle.join().unwrap_or_else(|_| {
            warn!("solve worker panicked");
            Err(SolveError::WorkerPanicked)
        })
    }
}

/// Starts solving `graph` on a new thread.
///
/// The graph is shared read-only, so several solves of the same graph with
/// different parameters can run at once.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vrp_engine::models::ModelBuilder;
/// use vrp_engine::compile::CompiledGraph;
/// use vrp_engine::search::{spawn_solve, SearchParameters};
///
/// let model = ModelBuilder::new(vec![
///     vec![0.0, 2.0],
///     vec![2.0, 0.0],
/// ])
/// .build()
/// .unwrap();
/// let graph = Arc::new(CompiledGraph::from_model(&model).unwrap());
///
/// let handle = spawn_solve(graph, SearchParameters::default()).unwrap();
/// let solution = handle.join().unwrap();
/// assert_eq!(solution.objective(), 4);
/// ```
pub fn spawn_solve(
    graph: Arc<CompiledGraph>,
    params: SearchParameters,
) -> io::Result<SolveHandle> {
    let solver = Solver::new(params);
    let cancellation = solver.cancellation_token();
    let handle = thread::Builder::new()
        .name("vrp-solve".to_string())
        .spawn(move || solver.solve(&graph))?;
    Ok(SolveHandle {
        handle,
        cancellation,
    })
}
