//! Bridson Poisson-disk sampling over the `[0,size]^2` square, used
//! to seed site locations before Delaunay/Voronoi construction.

use crate::geometry::Point;
use crate::rng::Rng;

const CANDIDATES_PER_ACTIVE: u32 = 30;

/// Generates points with minimum separation `r` over `[0,size]^2`, targeting
/// roughly `target_count` points via `r = 0.8 * sqrt(area / target_count)`
/// when `r` is not supplied directly.
pub fn poisson_disk(size: f64, target_count: usize, rng: &mut Rng) -> Vec<Point> {
    let area = size * size;
    let r = 0.8 * (area / target_count.max(1) as f64).sqrt();
    poisson_disk_with_radius(size, r, rng)
}

/// Core Bridson sampler parameterized directly by minimum spacing `r`.
pub fn poisson_disk_with_radius(size: f64, r: f64, rng: &mut Rng) -> Vec<Point> {
    if r <= 0.0 || size <= 0.0 {
        return Vec::new();
    }
    let cell_size = r / std::f64::consts::SQRT_2;
    let grid_dim = (size / cell_size).ceil() as usize + 1;
    let mut grid: Vec<Option<usize>> = vec![None; grid_dim * grid_dim];
    let mut points: Vec<Point> = Vec::new();
    let mut active: Vec<usize> = Vec::new();

    let cell_of = |p: Point| -> (usize, usize) {
        let gx = (p.x / cell_size).floor().clamp(0.0, (grid_dim - 1) as f64) as usize;
        let gy = (p.y / cell_size).floor().clamp(0.0, (grid_dim - 1) as f64) as usize;
        (gx, gy)
    };

    let first = Point::new(rng.next_range(0.0, size), rng.next_range(0.0, size));
    let (gx, gy) = cell_of(first);
    grid[gy * grid_dim + gx] = Some(0);
    points.push(first);
    active.push(0);

    while !active.is_empty() {
        let idx = rng.next_int(0, active.len() as i64 - 1) as usize;
        let origin = points[active[idx]];
        let mut found = false;

        for _ in 0..CANDIDATES_PER_ACTIVE {
            let angle = rng.next() * std::f64::consts::TAU;
            let radius = r * (1.0 + rng.next());
            let candidate = Point::new(origin.x + radius * angle.cos(), origin.y + radius * angle.sin());
            if candidate.x < 0.0 || candidate.x >= size || candidate.y < 0.0 || candidate.y >= size {
                continue;
            }
            if far_enough(candidate, &points, &grid, grid_dim, r, cell_of) {
                let (cgx, cgy) = cell_of(candidate);
                let new_idx = points.len();
                grid[cgy * grid_dim + cgx] = Some(new_idx);
                points.push(candidate);
                active.push(new_idx);
                found = true;
                break;
            }
        }

        if !found {
            active.swap_remove(idx);
        }
    }

    points
}

/// Scans the 5x5 block of background-grid cells centered on `candidate`'s
/// own cell. Since `cell_of` buckets by `r/sqrt(2)`, any point closer than
/// `r` must land within two cells of `candidate` in each axis, so this
/// window is exactly the neighborhood Bridson's algorithm requires.
fn far_enough(
    candidate: Point,
    points: &[Point],
    grid: &[Option<usize>],
    grid_dim: usize,
    r: f64,
    cell_of: impl Fn(Point) -> (usize, usize),
) -> bool {
    let (gx, gy) = cell_of(candidate);
    let lo_x = gx.saturating_sub(2);
    let hi_x = (gx + 2).min(grid_dim - 1);
    let lo_y = gy.saturating_sub(2);
    let hi_y = (gy + 2).min(grid_dim - 1);

    for y in lo_y..=hi_y {
        for x in lo_x..=hi_x {
            if let Some(i) = grid[y * grid_dim + x] {
                if candidate.distance(&points[i]) < r {
                    return false;
                }
            }
        }
    }
    true
}
