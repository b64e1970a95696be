//! The LOT scheduler CLI: read a source file, parse it, validate the
//! policy against the grid, solve, and print the requested
//! projection(s).

use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use lot_model::Model;
use lot_solver::{CpSatSolver, SolveError, WidenConfig};

#[derive(Parser)]
#[command(name = "lotc", version, about = "Solve a LOT scheduling source file")]
struct Cli {
    /// Path to the LOT source file.
    file: PathBuf,

    /// Widening-loop iteration budget.
    #[arg(long = "max-it", default_value_t = 5)]
    max_it: u32,

    /// Default rest-gap (roots) for actors with no `/` clause of their own.
    #[arg(long = "min-rest", default_value_t = 0)]
    min_rest: i64,

    /// Calendar year, passed through for reporting context only.
    #[arg(long)]
    year: Option<i32>,

    /// Calendar month, passed through for reporting context only.
    #[arg(long)]
    month: Option<u32>,

    /// Print the by-actor projection.
    #[arg(long)]
    actor: bool,

    /// Print the by-node projection.
    #[arg(long)]
    node: bool,

    /// Print the calendar-style projection.
    #[arg(long)]
    cal: bool,

    /// Dump the schedule to a spreadsheet at this path (reporter
    /// concern, not implemented by the core).
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let source = std::fs::read_to_string(&cli.file)
        .map_err(|e| format!("error: failed to read '{}': {e}", cli.file.display()))?;

    let (grid, policy) = lot_dsl::parse_lot(&source).map_err(|e| e.to_string())?;

    let missing = lot_dsl::validate::validate_policy(&grid, &policy);
    if !missing.is_empty() {
        let mut msg = String::from("Invalid keywords:\n");
        for (keyword, actor) in &missing {
            msg.push_str(&format!("    '{keyword}', from <{actor}>\n"));
        }
        msg.push_str(&format!("error: found {} error(s).", missing.len()));
        return Err(msg);
    }

    let model = Model::build(&grid, &policy);
    let config = WidenConfig { max_it: cli.max_it, min_rest: cli.min_rest, seed: seed() };
    let result = lot_solver::solve::<CpSatSolver>(&model, &config).map_err(render_solve_error)?;

    if let Some(path) = &cli.output {
        return Err(format!(
            "error: spreadsheet export to '{}' is not implemented by this build.",
            path.display()
        ));
    }

    let any_selected = cli.actor || cli.node || cli.cal;
    if cli.node || !any_selected {
        print_by_node(&model, &result);
    }
    if cli.actor {
        print_by_actor(&model, &result);
    }
    if cli.cal {
        print_cal(&model, &result, cli.year, cli.month);
    }
    Ok(())
}

fn render_solve_error(e: SolveError) -> String {
    format!("error: {e}")
}

fn seed() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or(0)
}

fn print_by_node(model: &Model, result: &lot_solver::ScheduleResult) {
    for node in &model.nodes {
        let assignee = result.by_node.get(node).map(String::as_str).unwrap_or(lot_solver::result::EXTRA);
        println!("{:<24} {assignee}", node.display_joined());
    }
}

fn print_by_actor(model: &Model, result: &lot_solver::ScheduleResult) {
    for actor in &model.actors {
        println!("{actor}:");
        for node in &result.by_actor[actor] {
            println!("  {}", node.display_joined());
        }
    }
}

/// Groups nodes by root and prints each root's assignees on one line.
fn print_cal(model: &Model, result: &lot_solver::ScheduleResult, year: Option<i32>, month: Option<u32>) {
    match (year, month) {
        (Some(y), Some(m)) => println!("{y}-{m:02}"),
        (Some(y), None) => println!("{y}"),
        _ => {}
    }
    for (root, indices) in &model.root_map {
        let mut cells = Vec::with_capacity(indices.len());
        for &n in indices {
            let node = &model.nodes[n];
            let assignee = result.by_node.get(node).map(String::as_str).unwrap_or(lot_solver::result::EXTRA);
            let rest = node.components()[1..].join(":");
            cells.push(if rest.is_empty() { assignee.to_string() } else { format!("{rest}={assignee}") });
        }
        println!("{root:<12} {}", cells.join("  "));
    }
}
