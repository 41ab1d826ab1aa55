//! `geo-solve`: a thin reference front end over the `geo-search` engine.
//!
//! Reads a JSON problem (file or stdin), performs the trivial-target
//! pre-check the engine itself does not do, calls `solve`, and prints the
//! path and stats as canonical JSON to stdout.

mod problem;

use std::io::Read as _;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use geo_kernel::state::FigureKind;
use geo_search::policy::SearchPolicy;
use geo_search::search::solve;
use problem::{Problem, ProblemError, ProblemFile};
use thiserror::Error;

fn figure_kind_str(kind: FigureKind) -> &'static str {
    match kind {
        FigureKind::Point => "point",
        FigureKind::Line => "line",
        FigureKind::Circle => "circle",
    }
}

#[derive(Debug, Parser)]
#[command(name = "geo-solve", about = "Search for a compass-and-straightedge construction")]
struct Args {
    /// Path to a JSON problem file. Omit to read from stdin.
    problem: Option<PathBuf>,

    /// Maximum construction steps per path (overrides the engine default).
    #[arg(long)]
    max_steps: Option<u32>,

    /// Maximum open-set size (overrides the engine default).
    #[arg(long)]
    max_open_list_size: Option<usize>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Problem(#[from] ProblemError),

    #[error("failed to serialize output: {0}")]
    Output(#[from] geo_kernel::json::CanonError),

    #[error("failed to build output value: {0}")]
    Value(#[from] serde_json::Error),
}

fn read_input(path: Option<&PathBuf>) -> Result<String, ProblemError> {
    match path {
        Some(p) => Ok(std::fs::read_to_string(p)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let raw = read_input(args.problem.as_ref())?;
    let file: ProblemFile = serde_json::from_str(&raw).map_err(ProblemError::Json)?;
    let Problem { state, target } = file.into_problem()?;

    // Scenario 4 (§8): the goal test only fires on newly created figures, so
    // a target already present among the knowns must be caught here.
    let already_present = state
        .points()
        .values()
        .chain(state.lines().values())
        .chain(state.circles().values())
        .any(|figure| target.matches(*figure));

    let mut policy = SearchPolicy::default();
    if let Some(max_steps) = args.max_steps {
        policy.max_steps = max_steps;
    }
    if let Some(max_open_list_size) = args.max_open_list_size {
        policy.max_open_list_size = max_open_list_size;
    }

    let output = if already_present {
        serde_json::json!({
            "path": [],
            "stats": { "states_explored": 0, "nodes_expanded": 0, "open_high_water": 0 },
            "termination_reason": "TrivialTargetAlreadyPresent",
        })
    } else {
        let cancel = AtomicBool::new(false);
        let outcome = solve(state, target, policy, &cancel);
        let steps: Vec<serde_json::Value> = outcome
            .path
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, step)| {
                serde_json::json!({
                    "index": i + 1,
                    "operation": step.operation.to_string(),
                    "inputs": step.inputs.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "output": { "type": figure_kind_str(step.output.kind), "id": step.output.to_string() },
                })
            })
            .collect();
        serde_json::json!({
            "path": steps,
            "stats": {
                "states_explored": outcome.stats.states_explored,
                "nodes_expanded": outcome.stats.nodes_expanded,
                "open_high_water": outcome.stats.open_high_water,
            },
            "termination_reason": format!("{:?}", outcome.stats.termination_reason),
        })
    };

    let bytes = geo_kernel::json::canonical_json_bytes(&output)?;
    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        tracing::error!(error = %err, "geo-solve failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
