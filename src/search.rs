use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, trace};

use crate::common::{Point, Route};
use crate::cost::CostModel;
use crate::error::{Result, SearchError};
use crate::grid::{CellStatus, Grid};
use crate::heap::MinHeap;
use crate::observer::SearchObserver;
use crate::stat::Stats;

/// Lifecycle of the engine, readable between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Cooperative cancellation handle; clones share one flag. The flag is
/// never reset, so a cancelled engine stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// A* over a grid with octile costs. Owns the grid, the open heap and the
/// run counters; one search at a time, strictly sequential expansion.
#[derive(Debug)]
pub struct AStar {
    grid: Grid,
    open: MinHeap<Point>,
    costs: CostModel,
    state: SearchState,
    stats: Stats,
    cancel: CancelToken,
}

impl AStar {
    pub fn new(grid: Grid) -> Self {
        Self::with_costs(grid, CostModel::default())
    }

    pub fn with_costs(grid: Grid, costs: CostModel) -> Self {
        // Worst case every cell passes through the open set once.
        let open = MinHeap::with_capacity(grid.columns() * grid.rows());
        Self {
            grid,
            open,
            costs,
            state: SearchState::default(),
            stats: Stats::default(),
            cancel: CancelToken::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Terrain edits between runs go through here.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// A handle that cancels this engine from another thread or a callback.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Search from `start` to `goal`, reporting progress to `observer`.
    /// Endpoints must be in bounds and passable; `start == goal` succeeds
    /// immediately with an empty route.
    #[instrument(skip_all, name="a_star", fields(start = format!("{:?}", start), goal = format!("{:?}", goal)), level = "debug")]
    pub fn find_path(
        &mut self,
        start: Point,
        goal: Point,
        observer: &mut dyn SearchObserver,
    ) -> Result<Route> {
        if !self.grid.contains(start) || !self.grid.cell(start).passable {
            self.state = SearchState::Failed;
            return Err(SearchError::InvalidStart(start));
        }
        if !self.grid.contains(goal) || !self.grid.cell(goal).passable {
            self.state = SearchState::Failed;
            return Err(SearchError::InvalidGoal(goal));
        }

        self.state = SearchState::Running;
        let began = Instant::now();
        let result = self.run(start, goal, observer);
        self.stats.time_us = began.elapsed().as_micros() as usize;

        match &result {
            Ok(route) => {
                self.state = SearchState::Succeeded;
                self.stats.route_cost = route.cost;
                self.stats.route_len = route.len();
                debug!("route found, cost {:?} length {:?}", route.cost, route.len());
            }
            Err(reason) => {
                self.state = SearchState::Failed;
                debug!("no route: {reason}");
            }
        }
        result
    }

    fn run(
        &mut self,
        start: Point,
        goal: Point,
        observer: &mut dyn SearchObserver,
    ) -> Result<Route> {
        self.stats = Stats::default();
        // Fresh metadata for this run; terrain survives.
        self.grid.reset_search();
        self.open.clear();

        if start == goal {
            return Ok(Route::empty());
        }

        {
            let cell = self.grid.cell_mut(start);
            cell.status = CellStatus::Start;
            cell.home_cost = 0;
            cell.goal_cost = self.costs.distance(start, goal);
        }
        observer.status_changed(start, CellStatus::Start);
        observer.cost_updated(start, 0, self.grid.cell(start).final_cost());
        self.grid.cell_mut(goal).status = CellStatus::Goal;
        observer.status_changed(goal, CellStatus::Goal);

        self.stats.discovered += 1;
        self.push_open(start);

        while !self.open.is_empty() {
            // Checked between expansion cycles only; a cancel that lands
            // mid-expansion takes effect on the next iteration.
            if self.cancel.is_cancelled() {
                debug!("cancelled after {:?} expansions", self.stats.expanded);
                return Err(SearchError::Cancelled);
            }

            let current = self.pop_open()?;
            trace!("expand cell: {current:?}");

            if current == goal {
                return self.trace_route(start, goal, observer);
            }

            // Update stats.
            self.stats.expanded += 1;

            {
                let cell = self.grid.cell_mut(current);
                if !matches!(cell.status, CellStatus::Start | CellStatus::Goal) {
                    cell.status = CellStatus::Closed;
                    observer.status_changed(current, CellStatus::Closed);
                }
            }

            let current_home = self.grid.cell(current).home_cost;
            for neighbor in self.grid.neighbors(current) {
                let cell = self.grid.cell(neighbor);
                if !cell.passable || cell.status == CellStatus::Closed {
                    continue;
                }

                let tentative = current_home.saturating_add(self.costs.distance(current, neighbor));
                if cell.discovered() && tentative >= cell.home_cost {
                    continue;
                }
                let first_visit = !cell.discovered();

                // Update stats.
                if first_visit {
                    self.stats.discovered += 1;
                } else {
                    self.stats.improved += 1;
                }

                let goal_estimate = self.costs.distance(neighbor, goal);
                let (total, newly_open) = {
                    let cell = self.grid.cell_mut(neighbor);
                    cell.home_cost = tentative;
                    cell.parent = Some(current);
                    if first_visit {
                        cell.goal_cost = goal_estimate;
                    }
                    let newly_open = first_visit && cell.status == CellStatus::Unvisited;
                    if newly_open {
                        cell.status = CellStatus::Open;
                    }
                    (cell.final_cost(), newly_open)
                };
                observer.cost_updated(neighbor, tentative, total);
                if newly_open {
                    observer.status_changed(neighbor, CellStatus::Open);
                }

                // Tricky: an improved cell that already sits in the heap
                // keeps its stale slot. Pushing it again would let it pop
                // (and close) twice, so membership is checked instead; a
                // later sift reads the live costs and self-corrects.
                if !self.open.contains(&neighbor) {
                    self.push_open(neighbor);
                }
            }
            trace!("open set {:?}", self.open);
        }

        debug!("open set exhausted");
        Err(SearchError::Unreachable)
    }

    fn push_open(&mut self, point: Point) {
        let grid = &self.grid;
        self.open.push(point, |a, b| Self::better(grid, *a, *b));
        self.stats.peak_open = self.stats.peak_open.max(self.open.len());
    }

    fn pop_open(&mut self) -> Result<Point> {
        let grid = &self.grid;
        Ok(self.open.pop_min(|a, b| Self::better(grid, *a, *b))?)
    }

    // Open-set ordering: lower final cost first, heuristic breaks exact
    // ties. Reads live cell costs, hence bare coordinates in the heap.
    fn better(grid: &Grid, a: Point, b: Point) -> bool {
        let ca = grid.cell(a);
        let cb = grid.cell(b);
        let fa = ca.final_cost();
        let fb = cb.final_cost();
        fa < fb || (fa == fb && ca.goal_cost < cb.goal_cost)
    }

    fn trace_route(
        &mut self,
        start: Point,
        goal: Point,
        observer: &mut dyn SearchObserver,
    ) -> Result<Route> {
        let mut points = Vec::new();
        let mut cursor = goal;
        while cursor != start {
            points.push(cursor);
            cursor = self
                .grid
                .cell(cursor)
                .parent
                .ok_or(SearchError::BrokenChain(cursor))?;
        }
        points.reverse();

        let cost = self.grid.cell(goal).home_cost;
        observer.path_traced(&points);
        debug!("route: {points:?}");
        Ok(Route { points, cost })
    }
}
