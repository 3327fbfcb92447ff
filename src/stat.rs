use serde::Serialize;
use tracing::info;

use crate::common::Cost;

/// Counters for a single `find_path` run, reset when the run starts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub expanded: usize,
    pub discovered: usize,
    pub improved: usize,
    pub peak_open: usize,
    pub time_us: usize,
    pub route_cost: Cost,
    pub route_len: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Cost {:?} Length {:?} Time(microseconds) {:?} Expanded {:?} Discovered {:?} Improved {:?} Peak open {:?}",
            self.route_cost,
            self.route_len,
            self.time_us,
            self.expanded,
            self.discovered,
            self.improved,
            self.peak_open
        );
    }
}
