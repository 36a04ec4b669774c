use std::path::PathBuf;

use crucible_core::Point;
use crucible_paths::{RunPolicy, SolveError};

/// Minimal-heat routes through a digit grid under run-length limits.
#[derive(clap::Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Grid file, one digit per cell and one line per row. `-` reads stdin.
    pub grid: PathBuf,

    /// Built-in run policy.
    #[arg(short, long, value_enum, conflicts_with_all = ["min_run", "max_run"])]
    pub preset: Option<Preset>,

    /// Shortest straight run allowed before turning.
    #[arg(long, requires = "max_run")]
    pub min_run: Option<u32>,

    /// Longest straight run allowed before a turn is forced.
    #[arg(long, requires = "min_run")]
    pub max_run: Option<u32>,

    /// Start cell as `x,y`. Defaults to the top-left corner.
    #[arg(long, value_parser = parse_point)]
    pub start: Option<Point>,

    /// Goal cell as `x,y`. Defaults to the bottom-right corner.
    #[arg(long, value_parser = parse_point)]
    pub goal: Option<Point>,

    /// Draw one optimal route over the grid.
    #[arg(long)]
    pub path: bool,

    /// Print results as JSON.
    #[arg(short, long)]
    pub json: bool,

    /// More logging (-v info, -vv debug, -vvv trace). `RUST_LOG` wins.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Runs of 1 to 3 cells.
    Standard,
    /// Runs of 4 to 10 cells.
    Ultra,
    /// Standard, then ultra.
    Both,
}

impl Args {
    /// Policies to solve for, in report order.
    pub fn policies(&self) -> Result<Vec<RunPolicy>, SolveError> {
        if let (Some(lo), Some(hi)) = (self.min_run, self.max_run) {
            return Ok(vec![RunPolicy::new(lo, hi)?]);
        }
        Ok(match self.preset.unwrap_or(Preset::Both) {
            Preset::Standard => vec![RunPolicy::STANDARD],
            Preset::Ultra => vec![RunPolicy::ULTRA],
            Preset::Both => vec![RunPolicy::STANDARD, RunPolicy::ULTRA],
        })
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("bad coordinate `{v}`: {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_to_both_presets() {
        let args = Args::try_parse_from(["crucible", "grid.txt"]).unwrap();
        assert_eq!(
            args.policies().unwrap(),
            vec![RunPolicy::STANDARD, RunPolicy::ULTRA]
        );
        assert_eq!(args.log_level(), "warn");
        assert_eq!(args.start, None);
    }

    #[test]
    fn custom_policy_and_points() {
        let args = Args::try_parse_from([
            "crucible", "-", "--min-run", "2", "--max-run", "5", "--start", "1, 2", "--goal",
            "3,4", "-vv",
        ])
        .unwrap();
        assert_eq!(args.policies().unwrap(), vec![RunPolicy::new(2, 5).unwrap()]);
        assert_eq!(args.start, Some(Point::new(1, 2)));
        assert_eq!(args.goal, Some(Point::new(3, 4)));
        assert_eq!(args.log_level(), "debug");
    }

    #[test]
    fn invalid_custom_policy_is_reported() {
        let args =
            Args::try_parse_from(["crucible", "g", "--min-run", "5", "--max-run", "2"]).unwrap();
        assert!(matches!(
            args.policies(),
            Err(SolveError::InvalidPolicy { .. })
        ));
    }

    #[test]
    fn rejects_half_a_policy_and_mixed_flags() {
        assert!(Args::try_parse_from(["crucible", "g", "--min-run", "2"]).is_err());
        assert!(
            Args::try_parse_from([
                "crucible", "g", "--preset", "ultra", "--min-run", "1", "--max-run", "2"
            ])
            .is_err()
        );
    }

    #[test]
    fn parse_point_errors() {
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,1").is_err());
        assert_eq!(parse_point("-1,0"), Ok(Point::new(-1, 0)));
    }
}
