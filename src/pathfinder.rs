use crate::error::PathError;
use crate::pathing_grid::WalkableGrid;
use crate::search::{SearchContext, SearchOutcome};
use crate::{DIAGONAL_COST, STRAIGHT_COST};
use grid_util::point::Point;
use itertools::Itertools;
use log::{debug, info, warn};
use num_traits::{Float, NumCast};

/// Step costs for straight and diagonal moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveCosts<C> {
    pub straight: C,
    pub diagonal: C,
}

impl Default for MoveCosts<f64> {
    fn default() -> Self {
        MoveCosts {
            straight: STRAIGHT_COST,
            diagonal: DIAGONAL_COST,
        }
    }
}

impl Default for MoveCosts<f32> {
    fn default() -> Self {
        MoveCosts {
            straight: STRAIGHT_COST as f32,
            diagonal: DIAGONAL_COST as f32,
        }
    }
}

fn to_cost<C: Float>(n: i32) -> C {
    // Every i32 has a (possibly rounded) float representation
    <C as NumCast>::from(n).unwrap_or_else(C::max_value)
}

impl<C: Float> MoveCosts<C> {
    pub fn new(straight: C, diagonal: C) -> MoveCosts<C> {
        MoveCosts { straight, diagonal }
    }

    /// Cost of a single move between two neighbouring cells.
    pub fn step(&self, from: &Point, to: &Point) -> C {
        if (from.x - to.x).abs() == 1 && (from.y - to.y).abs() == 1 {
            self.diagonal
        } else {
            self.straight
        }
    }

    /// Octile distance: the cost of taking as many diagonal steps as possible and going straight
    /// for the rest, ignoring obstacles.
    pub fn octile(&self, p1: &Point, p2: &Point) -> C {
        let delta_x = (p1.x - p2.x).abs();
        let delta_y = (p1.y - p2.y).abs();
        self.straight * to_cost::<C>(delta_x + delta_y)
            + (self.diagonal - self.straight - self.straight) * to_cost::<C>(delta_x.min(delta_y))
    }
}

/// A path found by [Pathfinder::try_find_path].
#[derive(Clone, Debug, PartialEq)]
pub struct Path<C> {
    /// Cells from start to goal, both included.
    pub cells: Vec<Point>,
    pub cost: C,
    /// Number of cells the search closed.
    pub expanded: usize,
}

impl<C> Path<C> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A* search on 8-connected grids using the octile distance as heuristic.
///
/// The pathfinder only holds configuration: every query allocates its own scratch state, so one
/// instance can serve any number of grids and threads.
#[derive(Clone, Debug)]
pub struct Pathfinder<C = f64> {
    pub costs: MoveCosts<C>,
    /// Scales the heuristic. Values above 1 give weighted A*, which expands fewer cells but may
    /// return longer paths; 0 turns the search into Dijkstra's algorithm.
    pub heuristic_factor: C,
    /// Gives up after closing this many cells.
    pub max_expansions: Option<usize>,
}

impl Pathfinder<f64> {
    pub fn new() -> Pathfinder<f64> {
        Pathfinder::with_costs(MoveCosts::default())
    }
}

impl Default for Pathfinder<f64> {
    fn default() -> Self {
        Pathfinder::new()
    }
}

impl Default for Pathfinder<f32> {
    fn default() -> Self {
        Pathfinder::with_costs(MoveCosts::default())
    }
}

impl<C: Float> Pathfinder<C> {
    pub fn with_costs(costs: MoveCosts<C>) -> Pathfinder<C> {
        Pathfinder {
            costs,
            heuristic_factor: C::one(),
            max_expansions: None,
        }
    }

    pub fn heuristic_factor(mut self, heuristic_factor: C) -> Self {
        self.heuristic_factor = heuristic_factor;
        self
    }

    pub fn max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Just the octile distance times the heuristic factor.
    pub fn heuristic(&self, p1: &Point, p2: &Point) -> C {
        self.costs.octile(p1, p2) * self.heuristic_factor
    }

    /// Sum of the step costs along `path`.
    pub fn path_cost(&self, path: &[Point]) -> C {
        path.iter()
            .tuple_windows()
            .fold(C::zero(), |total, (a, b)| total + self.costs.step(a, b))
    }

    /// Computes a minimum cost path from `start` to `goal`, both included. Returns `None` if
    /// either endpoint is blocked or outside the grid, if the goal cannot be reached, or if the
    /// expansion budget runs out; [try_find_path](Self::try_find_path) tells these apart.
    pub fn find_path<G>(&self, grid: &G, start: Point, goal: Point) -> Option<Vec<Point>>
    where
        G: WalkableGrid + ?Sized,
    {
        self.try_find_path(grid, start, goal)
            .ok()
            .map(|path| path.cells)
    }

    /// Like [find_path](Self::find_path), but reports why no path was found and returns the cost
    /// of the path alongside it.
    pub fn try_find_path<G>(&self, grid: &G, start: Point, goal: Point) -> Result<Path<C>, PathError>
    where
        G: WalkableGrid + ?Sized,
    {
        if !grid.is_walkable(&start) {
            return Err(PathError::InvalidStart(start));
        }
        if !grid.is_walkable(&goal) {
            return Err(PathError::InvalidGoal(goal));
        }
        if !grid.reachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Err(PathError::Unreachable { start, goal });
        }
        let mut ct = SearchContext::new();
        let outcome = ct.astar(
            grid,
            start,
            goal,
            |from, to| self.costs.step(from, to),
            |point| self.heuristic(point, &goal),
            self.max_expansions,
        );
        let expanded = ct.expanded();
        match outcome {
            SearchOutcome::Found { path, cost } => {
                debug!(
                    "Found path of {} cells from {} to {} after expanding {} cells",
                    path.len(),
                    start,
                    goal,
                    expanded
                );
                Ok(Path {
                    cells: path,
                    cost,
                    expanded,
                })
            }
            SearchOutcome::Exhausted => {
                debug!("Ran out of frontier before reaching {} from {}", goal, start);
                Err(PathError::Unreachable { start, goal })
            }
            SearchOutcome::OutOfBudget => {
                warn!(
                    "Gave up on path from {} to {} after expanding {} cells",
                    start, goal, expanded
                );
                Err(PathError::BudgetExhausted { expanded })
            }
        }
    }
}
