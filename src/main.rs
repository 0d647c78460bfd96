use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use vrp_engine::io::{
    render_plan, respond, solve_request, RequestError, SolveRequest, NO_SOLUTION_MESSAGE,
};

/// Solve a vehicle routing request given as JSON.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON request, or '-' for stdin
    input: PathBuf,

    /// Print the JSON response instead of the text summary
    #[arg(long)]
    json: bool,

    /// Wall-clock limit for the search, in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Polish the first solution with local search
    #[arg(long)]
    local_search: bool,

    #[arg(short, long)]
    debug: bool,
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read request from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    let mut request: SolveRequest =
        serde_json::from_str(&read_input(&cli.input)?).context("invalid request JSON")?;
    if cli.time_limit_ms.is_some() {
        request.time_limit_ms = cli.time_limit_ms;
    }
    request.local_search |= cli.local_search;

    info!(
        nodes = request.distance_matrix.len(),
        model_type = ?request.model_type,
        "solving request"
    );

    if cli.json {
        let response = respond(&request);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    match solve_request(&request) {
        Ok(plan) => {
            info!(
                total_cost = plan.total_cost,
                used_vehicles = plan.num_used_vehicles(),
                "solved"
            );
            print!("{}", render_plan(&plan));
        }
        Err(RequestError::Solve(err)) => {
            info!(error = %err, "no solution");
            println!("{}", NO_SOLUTION_MESSAGE);
        }
        Err(RequestError::Invalid(err)) => return Err(err).context("invalid request"),
    }

    Ok(())
}
