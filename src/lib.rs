//! # grid_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on static grids with
//! 8-directional movement. Diagonal moves are never allowed to cut a corner: both orthogonally
//! adjacent cells have to be free. The obstacle layout is fixed on construction, when the
//! neighbours of every cell and the
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) of the grid
//! are computed once, so that queries for unreachable goals return without flood-filling and
//! every other query only does table lookups while expanding cells.
//!
//! ```
//! use grid_astar::{Coordinate, PathingGrid, Pathfinder};
//!
//! // |S#.|
//! // |..G|
//! let grid = PathingGrid::new(3, 2, [Coordinate::new(1, 0)]).unwrap();
//! let path = Pathfinder::new()
//!     .find_path(&grid, Coordinate::new(0, 0), Coordinate::new(2, 1))
//!     .unwrap();
//! assert_eq!(path.len(), 4);
//! ```
pub mod error;
pub mod pathfinder;
pub mod pathing_grid;
pub mod queue;
mod search;

pub use error::{GridError, PathError};
pub use grid_util::point::Point as Coordinate;
pub use pathfinder::{MoveCosts, Path, Pathfinder};
pub use pathing_grid::{PathingGrid, WalkableGrid};
pub use queue::PriorityQueue;

/// Cost of a straight (cardinal) move.
pub const STRAIGHT_COST: f64 = 1.0;
/// Cost of a diagonal move. A fixed approximation of the square root of two, shared by the step
/// costs and the heuristic so the two never drift apart.
pub const DIAGONAL_COST: f64 = 1.41421;
