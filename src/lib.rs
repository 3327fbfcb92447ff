//! A* route planning over 8-connected grids with octile step costs.

pub mod common;
pub mod config;
pub mod cost;
pub mod error;
pub mod grid;
pub mod heap;
pub mod mapfile;
pub mod observer;
pub mod render;
pub mod scenario;
pub mod search;
pub mod stat;

pub use common::{Cost, Point, Route, UNDISCOVERED};
pub use cost::CostModel;
pub use error::SearchError;
pub use grid::{Cell, CellStatus, Grid};
pub use heap::{HeapEmpty, MinHeap};
pub use observer::{EventLog, NullObserver, SearchEvent, SearchObserver};
pub use search::{AStar, CancelToken, SearchState};
pub use stat::Stats;
