use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{Coordinate, Pathfinder, PathingGrid};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

/// Random grid with roughly `density` of its cells blocked, keeping the corners free.
fn random_grid(n: usize, density: f64, rng: &mut StdRng) -> PathingGrid {
    let corners = [Coordinate::new(0, 0), Coordinate::new(n as i32 - 1, n as i32 - 1)];
    let mut obstacles = Vec::new();
    for y in 0..n as i32 {
        for x in 0..n as i32 {
            let p = Coordinate::new(x, y);
            if !corners.contains(&p) && rng.gen_bool(density) {
                obstacles.push(p);
            }
        }
    }
    PathingGrid::new(n, n, obstacles).unwrap()
}

/// Random start/goal pairs that are on the same component.
fn scenarios(grid: &PathingGrid, count: usize, rng: &mut StdRng) -> Vec<(Coordinate, Coordinate)> {
    let mut scenarios = Vec::new();
    while scenarios.len() < count {
        let mut random_point = || {
            Coordinate::new(
                rng.gen_range(0..grid.width() as i32),
                rng.gen_range(0..grid.height() as i32),
            )
        };
        let (start, goal) = (random_point(), random_point());
        if grid.reachable(&start, &goal) {
            scenarios.push((start, goal));
        }
    }
    scenarios
}

fn construction_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for n in [64, 256] {
        let grid = random_grid(n, 0.2, &mut rng);
        let obstacles = (0..n as i32)
            .flat_map(|y| (0..n as i32).map(move |x| Coordinate::new(x, y)))
            .filter(|p| grid.is_obstacle(p))
            .collect::<Vec<_>>();
        c.bench_function(format!("build {n}x{n}").as_str(), |b| {
            b.iter(|| black_box(PathingGrid::new(n, n, obstacles.iter().copied()).unwrap()))
        });
    }
}

fn search_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    for density in [0.0, 0.2, 0.35] {
        let grid = random_grid(128, density, &mut rng);
        let scenarios = scenarios(&grid, 100, &mut rng);
        for (name, solver) in [
            ("A*", Pathfinder::new()),
            ("Dijkstra", Pathfinder::new().heuristic_factor(0.0)),
            ("Weighted A* (1.5)", Pathfinder::new().heuristic_factor(1.5)),
        ] {
            c.bench_function(format!("128x128 ({density} blocked), {name}").as_str(), |b| {
                b.iter(|| {
                    for (start, goal) in &scenarios {
                        black_box(solver.find_path(&grid, *start, *goal));
                    }
                })
            });
        }
    }
}

criterion_group!(benches, construction_bench, search_bench);
criterion_main!(benches);
