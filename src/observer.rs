use crate::common::{Cost, Point};
use crate::grid::CellStatus;

/// Presentation seam for watching a run as it happens. Callbacks fire
/// synchronously, return nothing, and default to no-ops; stopping a run
/// early goes through `CancelToken`, not a return value.
pub trait SearchObserver {
    /// A cell changed status: Open on discovery, Closed on expansion.
    fn status_changed(&mut self, at: Point, status: CellStatus) {
        let _ = (at, status);
    }

    /// A cell's home cost was set or improved; `total` is the new priority key.
    fn cost_updated(&mut self, at: Point, home: Cost, total: Cost) {
        let _ = (at, home, total);
    }

    /// The finished route, start excluded, goal included; fires only on success.
    fn path_traced(&mut self, points: &[Point]) {
        let _ = points;
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SearchObserver for NullObserver {}

/// One recorded callback. Mirrors `SearchObserver` method for method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    StatusChanged { at: Point, status: CellStatus },
    CostUpdated { at: Point, home: Cost, total: Cost },
    PathTraced { points: Vec<Point> },
}

/// Observer that records every callback in firing order.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<SearchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses_of(&self, at: Point) -> Vec<CellStatus> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SearchEvent::StatusChanged { at: p, status } if *p == at => Some(*status),
                _ => None,
            })
            .collect()
    }

    pub fn traced_path(&self) -> Option<&[Point]> {
        self.events.iter().rev().find_map(|event| match event {
            SearchEvent::PathTraced { points } => Some(points.as_slice()),
            _ => None,
        })
    }
}

impl SearchObserver for EventLog {
    fn status_changed(&mut self, at: Point, status: CellStatus) {
        self.events.push(SearchEvent::StatusChanged { at, status });
    }

    fn cost_updated(&mut self, at: Point, home: Cost, total: Cost) {
        self.events.push(SearchEvent::CostUpdated { at, home, total });
    }

    fn path_traced(&mut self, points: &[Point]) {
        self.events.push(SearchEvent::PathTraced {
            points: points.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_methods_are_no_ops() {
        struct Inert;
        impl SearchObserver for Inert {}

        let mut observer = Inert;
        observer.status_changed(Point::new(1, 2), CellStatus::Open);
        observer.cost_updated(Point::new(1, 2), 10, 24);
        observer.path_traced(&[Point::new(1, 2)]);
    }

    #[test]
    fn event_log_preserves_order_and_payloads() {
        let mut log = EventLog::new();
        let p = Point::new(2, 0);

        log.status_changed(p, CellStatus::Open);
        log.cost_updated(p, 10, 24);
        log.status_changed(p, CellStatus::Closed);
        log.path_traced(&[p]);

        assert_eq!(log.events.len(), 4);
        assert_eq!(log.statuses_of(p), vec![CellStatus::Open, CellStatus::Closed]);
        assert_eq!(log.traced_path(), Some(&[p][..]));
    }

    #[test]
    fn traced_path_absent_until_success() {
        let mut log = EventLog::new();
        log.status_changed(Point::new(0, 0), CellStatus::Start);
        assert_eq!(log.traced_path(), None);
    }
}
