use grid_astar::{Coordinate, PathError, Pathfinder, PathingGrid};

// find_path only tells whether a path exists; try_find_path says why it does not.
//  _____
// |S.#..|
// |..#.G|
// |..#..|
//  _____

fn main() {
    let wall = (0..3).map(|y| Coordinate::new(2, y));
    let pathing_grid = PathingGrid::new(5, 3, wall).unwrap();
    println!("{}", pathing_grid);
    let solver = Pathfinder::new().max_expansions(100);
    let queries = [
        (Coordinate::new(0, 0), Coordinate::new(1, 2)),
        (Coordinate::new(0, 0), Coordinate::new(4, 1)),
        (Coordinate::new(2, 1), Coordinate::new(0, 0)),
        (Coordinate::new(0, 0), Coordinate::new(9, 9)),
    ];
    for (start, goal) in queries {
        match solver.try_find_path(&pathing_grid, start, goal) {
            Ok(path) => println!("{} -> {}: {:?} (cost {:.3})", start, goal, path.cells, path.cost),
            Err(err @ PathError::BudgetExhausted { .. }) => println!("{} -> {}: {}, giving up", start, goal, err),
            Err(err) => println!("{} -> {}: {}", start, goal, err),
        }
    }
}
