//! Error types for grid construction and path queries.

use grid_util::point::Point;
use thiserror::Error;

/// Rejected [PathingGrid](crate::PathingGrid) construction inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height is zero.
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    /// A dimension cannot be addressed with [Point]'s `i32` coordinates.
    #[error("grid dimensions {width}x{height} exceed the addressable range")]
    TooLarge { width: usize, height: usize },
    /// An obstacle lies outside `[0, width) x [0, height)`.
    #[error("obstacle {obstacle} lies outside the {width}x{height} grid")]
    ObstacleOutOfBounds {
        obstacle: Point,
        width: usize,
        height: usize,
    },
}

/// Why a path query produced no path.
///
/// [find_path](crate::Pathfinder::find_path) collapses all of these into `None`;
/// [try_find_path](crate::Pathfinder::try_find_path) reports them individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("start {0} is not walkable")]
    InvalidStart(Point),
    #[error("goal {0} is not walkable")]
    InvalidGoal(Point),
    #[error("{goal} cannot be reached from {start}")]
    Unreachable { start: Point, goal: Point },
    /// The search closed `expanded` cells without reaching the goal.
    #[error("search budget exhausted after expanding {expanded} cells")]
    BudgetExhausted { expanded: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cells() {
        let err = PathError::Unreachable {
            start: Point::new(0, 0),
            goal: Point::new(3, 4),
        };
        let msg = err.to_string();
        assert!(msg.contains(&Point::new(0, 0).to_string()));
        assert!(msg.contains(&Point::new(3, 4).to_string()));

        let err = GridError::EmptyGrid {
            width: 0,
            height: 5,
        };
        assert_eq!(err.to_string(), "grid must have at least one cell, got 0x5");
    }
}
