use grid_astar::{Coordinate, Pathfinder, PathingGrid};

// The heuristic_factor can be set to scale the heuristic, causing nodes that are closer to the goal (ignoring obstacles)
// to be evaluated quicker than in normal operation. This is called Weighted A* and it can speed up the algorithm in
// certain scenarios, at the price of possibly longer paths.

fn rectangle(x: i32, y: i32, w: i32, h: i32) -> impl Iterator<Item = Coordinate> {
    (y..y + h).flat_map(move |y| (x..x + w).map(move |x| Coordinate::new(x, y)))
}

fn main() {
    const N: i32 = 30;
    let obstacles = rectangle(8, 8, 8, 8)
        .chain(rectangle(0, 3, 6, 6))
        .chain(rectangle(10, 0, 6, 6));
    let pathing_grid = PathingGrid::new(N as usize, N as usize, obstacles).unwrap();
    println!("{}", pathing_grid);
    let start = Coordinate::new(1, 1);
    let end = Coordinate::new(N - 3, N - 3);
    for factor in [1.0, 1.3, 2.0] {
        let path = Pathfinder::new()
            .heuristic_factor(factor)
            .try_find_path(&pathing_grid, start, end)
            .unwrap();
        println!(
            "Factor {}: {} cells, cost {:.3}, {} cells expanded",
            factor,
            path.len(),
            path.cost,
            path.expanded
        );
    }
}
