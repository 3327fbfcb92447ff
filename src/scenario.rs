use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::{bail, Context, Result};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{Cost, Point};
use crate::cost::CostModel;
use crate::grid::Grid;
use crate::mapfile;

/// One reproducible search setup. Terrain comes either from a map file
/// or from inline dimensions, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    /// Explicitly blocked cells, applied before any random scatter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub obstacles: Vec<Point>,
    /// Chance in [0, 1] that a free cell turns into an obstacle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obstacle_chance: Option<f64>,
    pub start: Point,
    pub goal: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub straight_cost: Option<Cost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonal_cost: Option<Cost>,
}

impl Scenario {
    pub fn load_from_yaml(path: &str) -> Result<Scenario> {
        let file = File::open(path).with_context(|| format!("cannot open scenario {path}"))?;
        let reader = BufReader::new(file);
        let scenario = serde_yaml::from_reader(reader)?;
        Ok(scenario)
    }

    pub fn save_to_yaml(&self, path: &str) -> Result<()> {
        let file = File::create(path).with_context(|| format!("cannot create {path}"))?;
        let mut writer = io::BufWriter::new(file);
        let yaml_data = serde_yaml::to_string(self)?;
        writer.write_all(yaml_data.as_bytes())?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        match (&self.map, self.columns, self.rows) {
            (Some(_), None, None) => {}
            (None, Some(_), Some(_)) => {}
            (Some(_), _, _) => bail!("scenario gives both a map file and inline dimensions"),
            _ => bail!("scenario needs a map file or both columns and rows"),
        }
        if self.columns == Some(0) || self.rows == Some(0) {
            bail!("grid dimensions must be positive");
        }
        if let Some(chance) = self.obstacle_chance {
            if !(0.0..=1.0).contains(&chance) {
                bail!("obstacle_chance {chance} is outside [0, 1]");
            }
        }
        if self.straight_cost == Some(0) || self.diagonal_cost == Some(0) {
            bail!("step costs must be positive");
        }
        Ok(())
    }

    /// Load or build the grid, block the listed obstacles, then scatter
    /// random ones with `rng`.
    pub fn build_grid<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Grid> {
        self.validate()?;

        let mut grid = match (&self.map, self.columns, self.rows) {
            (Some(path), _, _) => mapfile::load(path)?,
            (None, Some(columns), Some(rows)) => Grid::build(columns, rows),
            // validate() already rejected every other combination.
            _ => unreachable!(),
        };

        grid.block_all(&self.obstacles)
            .context("scenario obstacle outside the grid")?;
        if let Some(chance) = self.obstacle_chance {
            scatter_obstacles(&mut grid, chance, self.start, self.goal, rng);
        }

        info!(
            "scenario grid {}x{}, start {} goal {}",
            grid.columns(),
            grid.rows(),
            self.start,
            self.goal
        );
        Ok(grid)
    }

    /// Cost overrides applied over the defaults.
    pub fn cost_model(&self) -> CostModel {
        let defaults = CostModel::default();
        CostModel::new(
            self.straight_cost.unwrap_or(defaults.straight),
            self.diagonal_cost.unwrap_or(defaults.diagonal),
        )
    }
}

/// Block each free cell with probability `chance`, skipping `start` and
/// `goal`. Out-of-range chances are clamped, NaN scatters nothing.
pub fn scatter_obstacles<R: Rng + ?Sized>(
    grid: &mut Grid,
    chance: f64,
    start: Point,
    goal: Point,
    rng: &mut R,
) {
    // gen_bool panics outside [0, 1], so the range is enforced here.
    let chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
    if chance <= 0.0 {
        return;
    }
    for y in 0..grid.rows() as i32 {
        for x in 0..grid.columns() as i32 {
            let point = Point::new(x, y);
            if point == start || point == goal {
                continue;
            }
            if grid.cell(point).passable && rng.gen_bool(chance) {
                grid.cell_mut(point).passable = false;
            }
        }
    }
}
