use gridpath::common::Route;
use gridpath::config::{Cli, Config};
use gridpath::grid::Grid;
use gridpath::render::{self, TraceObserver};
use gridpath::scenario::{self, Scenario};
use gridpath::search::AStar;
use gridpath::stat::Stats;

use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Report<'a> {
    outcome: String,
    route: Option<&'a Route>,
    stats: &'a Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let config = Config::new(&cli);
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed as u64);

    let (grid, start, goal, costs) = if let Some(path) = &config.scenario_path {
        let setting = Scenario::load_from_yaml(path)
            .with_context(|| format!("error with scenario file: {path}"))?;
        let grid = setting.build_grid(&mut rng)?;
        (grid, setting.start, setting.goal, setting.cost_model())
    } else {
        // validate() already required all four direct-grid flags.
        let (Some(columns), Some(rows), Some(start), Some(goal)) =
            (config.columns, config.rows, config.start, config.goal)
        else {
            unreachable!();
        };
        let mut grid = Grid::build(columns, rows);
        scenario::scatter_obstacles(&mut grid, config.obstacle_chance, start, goal, &mut rng);
        (grid, start, goal, config.costs)
    };

    let mut engine = AStar::with_costs(grid, costs);

    if let Some(timeout_ms) = config.timeout_ms {
        let token = engine.cancel_token();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(timeout_ms));
            token.cancel();
        });
    }

    let outcome = engine.find_path(start, goal, &mut TraceObserver);

    match &outcome {
        Ok(route) => {
            info!("route found: {} cells, cost {}", route.len(), route.cost);
            if !config.quiet {
                println!("{}", render::render(engine.grid(), Some(route)));
            }
        }
        Err(reason) => {
            error!("search failed: {reason}");
            if !config.quiet {
                println!("{}", render::render(engine.grid(), None));
            }
        }
    }
    engine.stats().print();

    if let Some(path) = &config.output_path {
        let report = Report {
            outcome: match &outcome {
                Ok(_) => "success".to_string(),
                Err(reason) => reason.to_string(),
            },
            route: outcome.as_ref().ok(),
            stats: engine.stats(),
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).with_context(|| format!("cannot write report to {path}"))?;
        info!("report written to {path}");
    }

    Ok(())
}
