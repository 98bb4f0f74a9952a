use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use reindeer_maze::{CLIArgs, Report};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CLIArgs::parse();
    let mut maze = reindeer_maze::read_maze(&args.input_path).with_context(|| {
        format!(
            "Failed to read maze from given file({}).",
            args.input_path.display()
        )
    })?;

    let timer = Instant::now();
    let result = maze.solve().context("Failed to solve the given maze.")?;
    let report = Report {
        maze: &maze,
        result: &result,
        solve_ms: timer.elapsed().as_millis(),
    };

    print!("{}", report);
    if !result.is_reachable() {
        eprintln!("No path found to the goal.");
    }
    if args.print_map {
        print!("{}", maze);
    }
    if let Some(output_path) = &args.output {
        report.write_to(output_path)?;
    }

    Ok(())
}
