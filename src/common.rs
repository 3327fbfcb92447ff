use std::fmt;

use serde::{Deserialize, Serialize};

/// Movement cost unit, scaled so a straight step is 10 and a diagonal 14.
pub type Cost = u32;

/// Home cost of a cell the search has not discovered yet.
pub const UNDISCOVERED: Cost = Cost::MAX;

/// A 0-indexed grid coordinate; `x` grows rightward, `y` downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point offset by `(dx, dy)`, possibly outside any grid.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A successful search result: the points from the cell after the start
/// through the goal inclusive, plus the total cost at the goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub points: Vec<Point>,
    pub cost: Cost,
}

impl Route {
    pub(crate) fn empty() -> Self {
        Self {
            points: Vec::new(),
            cost: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
