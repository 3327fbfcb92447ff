use std::collections::HashSet;

use tracing::{debug, trace};

use crate::common::{Cost, Point, Route};
use crate::grid::{CellStatus, Grid};
use crate::observer::SearchObserver;

/// ASCII snapshot of a searched grid: `@` obstacle, `.` untouched, `o`
/// open, `x` closed, `S` start, `G` goal, `*` route. Route glyphs overlay
/// open/closed but never the endpoints.
pub fn render(grid: &Grid, route: Option<&Route>) -> String {
    let on_route: HashSet<Point> = route
        .map(|route| route.points.iter().copied().collect())
        .unwrap_or_default();

    let mut out = String::with_capacity((grid.columns() + 1) * grid.rows());
    for y in 0..grid.rows() as i32 {
        for x in 0..grid.columns() as i32 {
            let point = Point::new(x, y);
            let cell = grid.cell(point);
            let glyph = if !cell.passable {
                '@'
            } else {
                match cell.status {
                    CellStatus::Start => 'S',
                    CellStatus::Goal => 'G',
                    _ if on_route.contains(&point) => '*',
                    CellStatus::Open => 'o',
                    CellStatus::Closed => 'x',
                    _ => '.',
                }
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Streams every search event into the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceObserver;

impl SearchObserver for TraceObserver {
    fn status_changed(&mut self, at: Point, status: CellStatus) {
        debug!("cell {at} -> {status:?}");
    }

    fn cost_updated(&mut self, at: Point, home: Cost, total: Cost) {
        trace!("cell {at} cost {home} (total {total})");
    }

    fn path_traced(&mut self, points: &[Point]) {
        debug!("route traced through {} cells", points.len());
    }
}
