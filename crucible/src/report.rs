//! Text and JSON output for solved queries.

use std::collections::HashMap;
use std::io::{self, Write};

use crucible_core::{CostGrid, Direction, Point};
use crucible_paths::{Outcome, Route, RunPolicy};

/// Answer for one policy.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Report {
    pub policy: RunPolicy,
    pub start: Point,
    pub goal: Point,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
}

/// One line per report, each followed by its drawn route if present.
pub fn write_text(out: &mut impl Write, grid: &CostGrid, reports: &[Report]) -> io::Result<()> {
    for r in reports {
        writeln!(out, "{}: {}", r.policy, r.outcome)?;
        if let Some(route) = &r.route {
            writeln!(out, "{}", draw_route(grid, route))?;
        }
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write, reports: &[Report]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)
}

/// Render the grid with every entered cell replaced by the arrow of the
/// move that entered it.
pub fn draw_route(grid: &CostGrid, route: &Route) -> String {
    let marks: HashMap<Point, char> = route
        .path
        .windows(2)
        .filter_map(|w| Direction::from_delta(w[1] - w[0]).map(|d| (w[1], d.glyph())))
        .collect();

    let mut s = String::with_capacity(grid.bounds().len() + grid.height() as usize);
    for (p, cost) in grid.iter() {
        if p.x == 0 && p.y > 0 {
            s.push('\n');
        }
        let ch = marks
            .get(&p)
            .copied()
            .or_else(|| char::from_digit(cost, 10))
            .unwrap_or('#');
        s.push(ch);
    }
    s
}
