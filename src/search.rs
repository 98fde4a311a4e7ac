//! Call-local A* machinery. Every query builds its own [SearchContext], so nothing here is ever
//! shared between searches.
use crate::pathing_grid::WalkableGrid;
use crate::queue::PriorityQueue;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Float;
use std::cmp::Ordering;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

const NO_PARENT: usize = usize::MAX;

/// Frontier entry: index of a cell in [SearchContext::nodes] and its f-score.
struct SearchNode<C> {
    priority: C,
    index: usize,
}

impl<C: PartialEq> Eq for SearchNode<C> {}

impl<C: PartialEq> PartialEq for SearchNode<C> {
    fn eq(&self, other: &Self) -> bool {
        self.priority.eq(&other.priority)
    }
}

impl<C: PartialOrd> PartialOrd for SearchNode<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: PartialOrd> Ord for SearchNode<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Costs are sums of finite positive step costs, never NaN
        self.priority
            .partial_cmp(&other.priority)
            .unwrap_or(Ordering::Equal)
    }
}

/// Best known way of reaching a cell. Cells without an entry have an infinite g-score.
struct NodeState<C> {
    g: C,
    parent: usize,
    closed: bool,
}

pub(crate) enum SearchOutcome<C> {
    Found { path: Vec<Point>, cost: C },
    Exhausted,
    OutOfBudget,
}

pub(crate) struct SearchContext<C> {
    nodes: FxIndexMap<Point, NodeState<C>>,
    frontier: PriorityQueue<SearchNode<C>>,
    expanded: usize,
}

impl<C: Float> SearchContext<C> {
    pub(crate) fn new() -> SearchContext<C> {
        SearchContext {
            nodes: FxIndexMap::default(),
            frontier: PriorityQueue::new(),
            expanded: 0,
        }
    }

    /// Number of cells closed by the last search.
    pub(crate) fn expanded(&self) -> usize {
        self.expanded
    }

    /// Walks the parent links from `index` back to the start.
    fn reverse_path(&self, index: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut index = index;
        while let Some((&point, state)) = self.nodes.get_index(index) {
            path.push(point);
            index = state.parent;
        }
        path.reverse();
        path
    }

    /// A* from `start` to `goal` over `grid`. `cost` prices a single step between neighbours,
    /// `heuristic` estimates the remaining cost to `goal`. With a `budget`, the search gives up
    /// after closing that many cells.
    pub(crate) fn astar<G, FC, FH>(
        &mut self,
        grid: &G,
        start: Point,
        goal: Point,
        mut cost: FC,
        mut heuristic: FH,
        budget: Option<usize>,
    ) -> SearchOutcome<C>
    where
        G: WalkableGrid + ?Sized,
        FC: FnMut(&Point, &Point) -> C,
        FH: FnMut(&Point) -> C,
    {
        self.nodes.clear();
        self.frontier.clear();
        self.expanded = 0;

        self.nodes.insert(
            start,
            NodeState {
                g: C::zero(),
                parent: NO_PARENT,
                closed: false,
            },
        );
        self.frontier.push(SearchNode {
            priority: C::zero(),
            index: 0,
        });

        while let Some(SearchNode { index, .. }) = self.frontier.pop() {
            let (node, g) = match self.nodes.get_index_mut(index) {
                Some((&node, state)) if !state.closed => {
                    state.closed = true;
                    (node, state.g)
                }
                // A cheaper copy of this cell was already expanded
                _ => continue,
            };
            self.expanded += 1;

            if node == goal {
                return SearchOutcome::Found {
                    path: self.reverse_path(index),
                    cost: g,
                };
            }
            if budget.is_some_and(|max| self.expanded >= max) {
                return SearchOutcome::OutOfBudget;
            }

            for successor in grid.neighbors(&node) {
                let new_cost = g + cost(&node, &successor);
                let n; // index for successor
                match self.nodes.entry(successor) {
                    Vacant(e) => {
                        n = e.index();
                        e.insert(NodeState {
                            g: new_cost,
                            parent: index,
                            closed: false,
                        });
                    }
                    Occupied(mut e) => {
                        if new_cost < e.get().g {
                            n = e.index();
                            let state = e.get_mut();
                            state.g = new_cost;
                            state.parent = index;
                        } else {
                            continue;
                        }
                    }
                }
                self.frontier.push(SearchNode {
                    priority: new_cost + heuristic(&successor),
                    index: n,
                });
            }
        }
        SearchOutcome::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathing_grid::PathingGrid;

    fn unit_cost(_: &Point, _: &Point) -> f64 {
        1.0
    }

    #[test]
    fn frontier_orders_by_priority_only() {
        let mut queue = PriorityQueue::new();
        for (priority, index) in [(3.0, 0), (1.5, 1), (1.5, 2), (0.5, 3)] {
            queue.push(SearchNode { priority, index });
        }
        let order = std::iter::from_fn(|| queue.pop())
            .map(|n| n.priority)
            .collect::<Vec<f64>>();
        assert_eq!(order, vec![0.5, 1.5, 1.5, 3.0]);
    }

    #[test]
    fn finds_goal_and_reconstructs_from_start() {
        let grid = PathingGrid::open(4, 1).unwrap();
        let mut ct = SearchContext::new();
        let outcome = ct.astar(
            &grid,
            Point::new(0, 0),
            Point::new(3, 0),
            unit_cost,
            |_| 0.0,
            None,
        );
        match outcome {
            SearchOutcome::Found { path, cost } => {
                assert_eq!(
                    path,
                    (0..4).map(|x| Point::new(x, 0)).collect::<Vec<_>>()
                );
                assert_eq!(cost, 3.0);
            }
            _ => panic!("expected a path"),
        }
        assert_eq!(ct.expanded(), 4);
    }

    #[test]
    fn exhausts_enclosed_region() {
        let grid = PathingGrid::new(3, 1, [Point::new(1, 0)]).unwrap();
        let mut ct = SearchContext::new();
        let outcome = ct.astar(
            &grid,
            Point::new(0, 0),
            Point::new(2, 0),
            unit_cost,
            |_| 0.0,
            None,
        );
        assert!(matches!(outcome, SearchOutcome::Exhausted));
        assert_eq!(ct.expanded(), 1);
    }

    #[test]
    fn stops_at_budget() {
        let grid = PathingGrid::open(10, 1).unwrap();
        let mut ct = SearchContext::new();
        let outcome = ct.astar(
            &grid,
            Point::new(0, 0),
            Point::new(9, 0),
            unit_cost,
            |_| 0.0,
            Some(3),
        );
        assert!(matches!(outcome, SearchOutcome::OutOfBudget));
        assert_eq!(ct.expanded(), 3);
    }

    #[test]
    fn context_is_reusable() {
        let grid = PathingGrid::open(5, 5).unwrap();
        let mut ct = SearchContext::new();
        let mut run = |goal| match ct.astar(&grid, Point::new(0, 0), goal, unit_cost, |_| 0.0, None) {
            SearchOutcome::Found { path, .. } => path,
            _ => panic!("expected a path"),
        };
        let first = run(Point::new(4, 4));
        let second = run(Point::new(4, 4));
        assert_eq!(first, second);
        assert_eq!(run(Point::new(0, 0)), vec![Point::new(0, 0)]);
    }
}
