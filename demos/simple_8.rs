use grid_astar::{Coordinate, Pathfinder, PathingGrid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood, but diagonal moves may not cut the corner of the obstacle.

fn main() {
    let pathing_grid = PathingGrid::new(3, 3, [Coordinate::new(1, 1)]).unwrap();
    println!("{}", pathing_grid);
    let start = Coordinate::new(0, 0);
    let end = Coordinate::new(2, 2);
    let path = Pathfinder::new()
        .find_path(&pathing_grid, start, end)
        .unwrap();
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
