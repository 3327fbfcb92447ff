use anyhow::anyhow;
use clap::Parser;

use crate::common::{Cost, Point};
use crate::cost::CostModel;

fn parse_point(text: &str) -> Result<Point, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {text:?}"))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in {text:?}"))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in {text:?}"))?;
    Ok(Point::new(x, y))
}

#[derive(Parser, Debug)]
#[command(
    name = "gridpath",
    about = "A* route planning over 8-connected grids.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML scenario file")]
    pub scenario: Option<String>,

    #[arg(long, help = "Grid width in cells, used without a scenario")]
    pub columns: Option<usize>,

    #[arg(long, help = "Grid height in cells, used without a scenario")]
    pub rows: Option<usize>,

    #[arg(long, help = "Start cell as x,y", value_parser = parse_point)]
    pub start: Option<Point>,

    #[arg(long, help = "Goal cell as x,y", value_parser = parse_point)]
    pub goal: Option<Point>,

    #[arg(
        long,
        help = "Chance in [0,1] that a free cell becomes an obstacle",
        default_value_t = 0.0
    )]
    pub obstacle_chance: f64,

    #[arg(
        long,
        help = "Seed for the random number generator",
        default_value_t = 0
    )]
    pub seed: usize,

    #[arg(long, help = "Cost of a straight step", default_value_t = 10)]
    pub straight_cost: Cost,

    #[arg(long, help = "Cost of a diagonal step", default_value_t = 14)]
    pub diagonal_cost: Cost,

    #[arg(long, help = "Cancel the search after this many milliseconds")]
    pub timeout_ms: Option<u64>,

    #[arg(long, help = "Path to write a JSON run report")]
    pub output: Option<String>,

    #[arg(
        long,
        help = "Suppress the ASCII rendering of the result",
        default_value_t = false
    )]
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scenario_path: Option<String>,
    pub columns: Option<usize>,
    pub rows: Option<usize>,
    pub start: Option<Point>,
    pub goal: Option<Point>,
    pub obstacle_chance: f64,
    pub seed: usize,
    pub costs: CostModel,
    pub timeout_ms: Option<u64>,
    pub output_path: Option<String>,
    pub quiet: bool,
}

impl Config {
    pub fn new(cli: &Cli) -> Self {
        Self {
            scenario_path: cli.scenario.clone(),
            columns: cli.columns,
            rows: cli.rows,
            start: cli.start,
            goal: cli.goal,
            obstacle_chance: cli.obstacle_chance,
            seed: cli.seed,
            costs: CostModel::new(cli.straight_cost, cli.diagonal_cost),
            timeout_ms: cli.timeout_ms,
            output_path: cli.output.clone(),
            quiet: cli.quiet,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.scenario_path.is_some() {
            if self.columns.is_some() || self.rows.is_some() {
                return Err(anyhow!("--scenario conflicts with --columns/--rows"));
            }
            if self.start.is_some() || self.goal.is_some() {
                return Err(anyhow!("--scenario conflicts with --start/--goal"));
            }
        } else {
            if self.columns.is_none() || self.rows.is_none() {
                return Err(anyhow!(
                    "either --scenario or both --columns and --rows are required"
                ));
            }
            if self.columns == Some(0) || self.rows == Some(0) {
                return Err(anyhow!("grid dimensions must be positive"));
            }
            if self.start.is_none() || self.goal.is_none() {
                return Err(anyhow!("--start and --goal are required without a scenario"));
            }
        }

        if !(0.0..=1.0).contains(&self.obstacle_chance) {
            return Err(anyhow!(
                "obstacle chance must be within [0, 1], got {}",
                self.obstacle_chance
            ));
        }

        if self.costs.straight == 0 || self.costs.diagonal == 0 {
            return Err(anyhow!("step costs must be positive"));
        }
        Ok(())
    }
}
