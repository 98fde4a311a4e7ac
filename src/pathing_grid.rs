use crate::error::GridError;
use core::fmt;
use fxhash::FxBuildHasher;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use indexmap::IndexMap;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::iter::Copied;
use std::slice;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Neighbour lists never exceed the Moore neighbourhood.
pub type Neighbours = SmallVec<[Point; 8]>;

/// Moore neighbourhood offsets, row by row.
const OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The capabilities a search needs from a grid. Implemented by [PathingGrid], but any grid that
/// can answer these (procedurally generated, unbounded, ...) can be searched.
pub trait WalkableGrid {
    type Neighbours<'a>: IntoIterator<Item = Point>
    where
        Self: 'a;

    /// Whether `pos` lies inside the grid.
    fn is_valid(&self, pos: &Point) -> bool;
    /// Whether `pos` lies inside the grid and is not blocked.
    fn is_walkable(&self, pos: &Point) -> bool;
    /// Cells that can be stepped to from `pos` in a single move. Empty for cells that are not
    /// walkable.
    fn neighbors(&self, pos: &Point) -> Self::Neighbours<'_>;
    /// Cheap pre-check used to skip hopeless searches. Must never return `false` for a pair that
    /// is connected; the default assumes everything might be.
    fn reachable(&self, _start: &Point, _goal: &Point) -> bool {
        true
    }
}

/// A static grid of obstacles. All neighbour lists and [connected
/// components](https://en.wikipedia.org/wiki/Component_(graph_theory)) are computed once on
/// construction, after which the grid never changes and can be shared freely between searches
/// and threads.
///
/// Diagonal moves are only allowed when both orthogonally adjacent cells are free, so paths
/// never cut through a corner.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    width: usize,
    height: usize,
    grid: BoolGrid,
    obstacle_count: usize,
    neighbours: FxIndexMap<Point, Neighbours>,
    components: UnionFind<usize>,
}

impl PathingGrid {
    /// Builds a grid of `width` x `height` cells with the given cells blocked. Duplicate
    /// obstacles are fine; obstacles outside the grid are rejected.
    pub fn new<I>(width: usize, height: usize, obstacles: I) -> Result<PathingGrid, GridError>
    where
        I: IntoIterator<Item = Point>,
    {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        if width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(GridError::TooLarge { width, height });
        }
        let mut grid = BoolGrid::new(width, height, false);
        let mut obstacle_count = 0;
        for obstacle in obstacles {
            if !in_bounds(width, height, &obstacle) {
                return Err(GridError::ObstacleOutOfBounds {
                    obstacle,
                    width,
                    height,
                });
            }
            if !grid.get(obstacle.x as usize, obstacle.y as usize) {
                grid.set(obstacle.x as usize, obstacle.y as usize, true);
                obstacle_count += 1;
            }
        }
        let mut pathing_grid = PathingGrid {
            width,
            height,
            grid,
            obstacle_count,
            neighbours: FxIndexMap::default(),
            components: UnionFind::new(width * height),
        };
        pathing_grid.precompute_neighbours();
        pathing_grid.generate_components();
        debug!(
            "Built {}x{} grid: {} obstacles, {} walkable cells",
            width,
            height,
            obstacle_count,
            pathing_grid.neighbours.len()
        );
        Ok(pathing_grid)
    }

    /// A grid without any obstacles.
    pub fn open(width: usize, height: usize) -> Result<PathingGrid, GridError> {
        PathingGrid::new(width, height, std::iter::empty())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacle_count
    }

    pub fn is_obstacle(&self, pos: &Point) -> bool {
        self.is_valid(pos) && self.grid.get(pos.x as usize, pos.y as usize)
    }

    /// Linear `x + y * width` index of a cell that is known to be in bounds.
    fn get_ix_point(&self, pos: &Point) -> usize {
        pos.x as usize + pos.y as usize * self.width
    }

    fn cells(&self) -> impl Iterator<Item = Point> {
        iproduct!(0..self.height as i32, 0..self.width as i32).map(|(y, x)| Point::new(x, y))
    }

    /// Walkable cells one step away from `pos`. A diagonal step additionally requires both cells
    /// it passes between to be walkable.
    fn compute_neighbours(&self, pos: &Point) -> Neighbours {
        OFFSETS
            .iter()
            .filter(|&&(dx, dy)| {
                self.is_walkable(&Point::new(pos.x + dx, pos.y + dy))
                    && (dx == 0
                        || dy == 0
                        || (self.is_walkable(&Point::new(pos.x + dx, pos.y))
                            && self.is_walkable(&Point::new(pos.x, pos.y + dy))))
            })
            .map(|&(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
            .collect()
    }

    fn precompute_neighbours(&mut self) {
        let neighbours = self
            .cells()
            .filter(|p| self.is_walkable(p))
            .map(|p| (p, self.compute_neighbours(&p)))
            .collect::<FxIndexMap<_, _>>();
        self.neighbours = neighbours;
    }

    /// Links every walkable cell to its neighbours in a fresh [UnionFind].
    fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.width * self.height);
        for (point, neighbours) in &self.neighbours {
            let parent_ix = self.get_ix_point(point);
            for n in neighbours {
                components.union(parent_ix, self.get_ix_point(n));
            }
        }
        self.components = components;
        debug!("Generated connected components");
    }

    /// Retrieves the component id a given [Point] belongs to, or `None` outside the grid.
    /// Obstacles form components of their own.
    pub fn component(&self, pos: &Point) -> Option<usize> {
        self.is_valid(pos)
            .then(|| self.components.find(self.get_ix_point(pos)))
    }

    /// Checks if start and goal are walkable and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        self.is_walkable(start)
            && self.is_walkable(goal)
            && self
                .components
                .equiv(self.get_ix_point(start), self.get_ix_point(goal))
    }

    /// Negation of [reachable](Self::reachable).
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }
}

fn in_bounds(width: usize, height: usize, pos: &Point) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

impl WalkableGrid for PathingGrid {
    type Neighbours<'a> = Copied<slice::Iter<'a, Point>>;

    fn is_valid(&self, pos: &Point) -> bool {
        in_bounds(self.width, self.height, pos)
    }

    fn is_walkable(&self, pos: &Point) -> bool {
        self.is_valid(pos) && !self.grid.get(pos.x as usize, pos.y as usize)
    }

    fn neighbors(&self, pos: &Point) -> Self::Neighbours<'_> {
        self.neighbours
            .get(pos)
            .map(|n| n.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    fn reachable(&self, start: &Point, goal: &Point) -> bool {
        PathingGrid::reachable(self, start, goal)
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height as i32 {
            let row = (0..self.width as i32)
                .map(|x| if self.grid.get(x as usize, y as usize) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
