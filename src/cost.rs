use crate::common::{Cost, Point};

/// Canonical cost of a horizontal or vertical step.
pub const STRAIGHT_COST: Cost = 10;
/// Canonical cost of a diagonal step (√2 scaled to match).
pub const DIAGONAL_COST: Cost = 14;

/// Movement costs for an 8-directional grid. The octile distance is both
/// the step cost between adjacent cells and the heuristic toward the
/// goal; it must not overestimate, so `diagonal <= 2 * straight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    pub straight: Cost,
    pub diagonal: Cost,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            straight: STRAIGHT_COST,
            diagonal: DIAGONAL_COST,
        }
    }
}

impl CostModel {
    pub fn new(straight: Cost, diagonal: Cost) -> Self {
        Self { straight, diagonal }
    }

    /// Octile distance between two cells.
    pub fn distance(&self, a: Point, b: Point) -> Cost {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        let lo = dx.min(dy);
        let hi = dx.max(dy);
        self.diagonal * lo + self.straight * (hi - lo)
    }
}
