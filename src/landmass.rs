//! Landmass detection
//!
//! Thresholds the elevation grid into a binary land mask and extracts
//! 4-connected components with a breadth-first flood fill. Components are
//! reported in the order a row-major scan first touches them; that order is
//! what decides which island draws which name later, so it is part of the
//! reproducibility contract.

use std::collections::VecDeque;

use crate::grid::Grid;

/// A maximal 4-connected set of land cells.
///
/// Always non-empty: the detector only emits components seeded from a land
/// cell.
#[derive(Clone, Debug)]
pub struct Landmass {
    pub cells: Vec<(usize, usize)>,
}

impl Landmass {
    /// Number of member cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Integer mean of the member coordinates.
    pub fn centroid(&self) -> (usize, usize) {
        let (sx, sy) = self
            .cells
            .iter()
            .fold((0usize, 0usize), |(sx, sy), &(x, y)| (sx + x, sy + y));
        (sx / self.cells.len(), sy / self.cells.len())
    }
}

/// Build the binary land mask: a cell is land iff its elevation exceeds the
/// threshold.
pub fn land_mask(elevation: &Grid<f64>, threshold: f64) -> Grid<bool> {
    let size = elevation.size();
    let mut mask = Grid::new_with(size, false);
    for (x, y, &e) in elevation.iter() {
        if e > threshold {
            mask.set(x, y, true);
        }
    }
    mask
}

/// Extract every landmass from the mask.
///
/// Row-major scan; each unvisited land cell seeds a BFS that claims its
/// whole component. One global visited grid caps the total work at one
/// visit per cell regardless of how many components there are.
pub fn detect_landmasses(mask: &Grid<bool>) -> Vec<Landmass> {
    let size = mask.size();
    let mut visited = Grid::new_with(size, false);
    let mut landmasses = Vec::new();

    for y in 0..size {
        for x in 0..size {
            if *visited.get(x, y) || !*mask.get(x, y) {
                continue;
            }

            let mut cells = Vec::new();
            let mut queue = VecDeque::new();
            queue.push_back((x, y));
            visited.set(x, y, true);

            while let Some((cx, cy)) = queue.pop_front() {
                cells.push((cx, cy));
                for (nx, ny) in mask.neighbors(cx, cy) {
                    if *mask.get(nx, ny) && !*visited.get(nx, ny) {
                        visited.set(nx, ny, true);
                        queue.push_back((nx, ny));
                    }
                }
            }

            landmasses.push(Landmass { cells });
        }
    }

    landmasses
}
