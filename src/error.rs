use thiserror::Error;

use crate::common::Point;
use crate::heap::HeapEmpty;

/// Why a search ended without a route, or could not start at all.
/// `Unreachable` and `Cancelled` are ordinary outcomes; `EmptyHeap` and
/// `BrokenChain` signal a violated internal invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("point {point} lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        point: Point,
        columns: usize,
        rows: usize,
    },

    #[error("start {0} is out of bounds or blocked")]
    InvalidStart(Point),

    #[error("goal {0} is out of bounds or blocked")]
    InvalidGoal(Point),

    #[error("open set exhausted before the goal was reached")]
    Unreachable,

    #[error("search cancelled")]
    Cancelled,

    #[error("open heap drained mid-expansion")]
    EmptyHeap(#[from] HeapEmpty),

    #[error("parent chain broken at {0} while tracing the route")]
    BrokenChain(Point),
}

pub type Result<T> = std::result::Result<T, SearchError>;
