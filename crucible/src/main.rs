//! Crucible — minimal-heat routes through a digit grid.
//!
//! Run: cargo run -- grid.txt --preset both --path

mod cli;
mod report;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use clap::Parser;
use crucible_core::CostGrid;
use crucible_paths::{Outcome, RunSearch};

use cli::Args;
use report::Report;

fn read_grid(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut s = String::new();
        io::stdin().read_to_string(&mut s)?;
        Ok(s)
    } else {
        fs::read_to_string(path)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    let grid = CostGrid::parse(&read_grid(&args.grid)?)?;
    let (top_left, bottom_right) = grid.corners();
    let start = args.start.unwrap_or(top_left);
    let goal = args.goal.unwrap_or(bottom_right);
    log::info!(
        "loaded {}x{} grid from {}",
        grid.width(),
        grid.height(),
        args.grid.display()
    );

    let mut reports = Vec::new();
    for policy in args.policies()? {
        let search = RunSearch::new(&grid, policy);
        let (outcome, route) = if args.path {
            let route = search.route(start, goal)?;
            let outcome = route
                .as_ref()
                .map_or(Outcome::Unreachable, |r| Outcome::Reached(r.cost));
            (outcome, route)
        } else {
            (search.solve(start, goal)?, None)
        };
        reports.push(Report {
            policy,
            start,
            goal,
            outcome,
            route,
        });
    }

    let mut out = io::stdout().lock();
    if args.json {
        report::write_json(&mut out, &reports)?;
    } else {
        report::write_text(&mut out, &grid, &reports)?;
    }
    Ok(())
}
