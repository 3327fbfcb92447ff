use crate::common::{Cost, Point, UNDISCOVERED};
use crate::error::{Result, SearchError};

/// Where a cell stands in the current search. `Start` and `Goal` survive
/// the whole run; the engine never overwrites them with `Open` or `Closed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellStatus {
    #[default]
    Unvisited,
    Open,
    Closed,
    Start,
    Goal,
}

/// One grid square plus its per-run search metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub passable: bool,
    pub status: CellStatus,
    /// Cheapest known cost from the start, `UNDISCOVERED` until relaxed.
    pub home_cost: Cost,
    /// Heuristic estimate to the goal.
    pub goal_cost: Cost,
    pub parent: Option<Point>,
}

impl Cell {
    pub fn discovered(&self) -> bool {
        self.home_cost != UNDISCOVERED
    }

    /// Priority key for the open set; saturates so undiscovered cells
    /// compare worst.
    pub fn final_cost(&self) -> Cost {
        self.home_cost.saturating_add(self.goal_cost)
    }

    fn reset(&mut self) {
        self.status = CellStatus::Unvisited;
        self.home_cost = UNDISCOVERED;
        self.goal_cost = 0;
        self.parent = None;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            passable: true,
            status: CellStatus::Unvisited,
            home_cost: UNDISCOVERED,
            goal_cost: 0,
            parent: None,
        }
    }
}

/// Dense row-major field of cells. Dimensions are fixed at build time;
/// terrain may change between runs, search metadata is wiped per run.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn build(columns: usize, rows: usize) -> Self {
        debug_assert!(columns > 0 && rows > 0, "grid dimensions must be positive");
        Self {
            columns,
            rows,
            cells: vec![Cell::default(); columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && point.x < self.columns as i32
            && point.y < self.rows as i32
    }

    fn index(&self, point: Point) -> usize {
        point.y as usize * self.columns + point.x as usize
    }

    pub fn get(&self, point: Point) -> Result<&Cell> {
        if !self.contains(point) {
            return Err(self.out_of_bounds(point));
        }
        Ok(&self.cells[self.index(point)])
    }

    pub fn get_mut(&mut self, point: Point) -> Result<&mut Cell> {
        if !self.contains(point) {
            return Err(self.out_of_bounds(point));
        }
        let index = self.index(point);
        Ok(&mut self.cells[index])
    }

    // Direct accessor for coordinates already validated by the caller.
    pub(crate) fn cell(&self, point: Point) -> &Cell {
        debug_assert!(self.contains(point));
        &self.cells[self.index(point)]
    }

    pub(crate) fn cell_mut(&mut self, point: Point) -> &mut Cell {
        debug_assert!(self.contains(point));
        let index = self.index(point);
        &mut self.cells[index]
    }

    /// In-bounds Moore neighbors in fixed scan order (`dx` outer, `dy`
    /// inner). Passability is not filtered here; expansion decides.
    pub fn neighbors(&self, point: Point) -> Vec<Point> {
        let mut neighbors = Vec::with_capacity(8);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let next = point.shift(dx, dy);
                if self.contains(next) {
                    neighbors.push(next);
                }
            }
        }
        neighbors
    }

    pub fn set_passable(&mut self, point: Point, passable: bool) -> Result<()> {
        self.get_mut(point)?.passable = passable;
        Ok(())
    }

    /// Block every listed point, rejecting the whole batch if any point
    /// falls outside the grid.
    pub fn block_all(&mut self, points: &[Point]) -> Result<()> {
        for &point in points {
            if !self.contains(point) {
                return Err(self.out_of_bounds(point));
            }
        }
        for &point in points {
            self.cell_mut(point).passable = false;
        }
        Ok(())
    }

    /// Wipe status, costs and parents for a fresh run; passability survives.
    pub fn reset_search(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    fn out_of_bounds(&self, point: Point) -> SearchError {
        SearchError::OutOfBounds {
            point,
            columns: self.columns,
            rows: self.rows,
        }
    }
}
