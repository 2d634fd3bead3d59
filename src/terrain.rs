//! Elevation synthesis
//!
//! Combines three noise octaves with a radial falloff so the high ground
//! collects around the map center and the edges drown, guaranteeing an
//! island chain rather than an edge-to-edge continent.

use rayon::prelude::*;

use crate::config::MapConfig;
use crate::grid::Grid;
use crate::noise_field::NoiseField;

/// (amplitude weight, frequency multiplier) per octave.
///
/// Each octave is sampled through `normalized`, so the combined value is not
/// renormalized to [0, 1] — the land threshold and the color bucket scale
/// are tuned against exactly this distribution. Do not change one without
/// the others.
const OCTAVES: [(f64, f64); 3] = [(0.85, 7.0), (0.10, 35.0), (0.05, 100.0)];

/// Generate the elevation grid for one run.
///
/// Pure function of (seed, size, falloff constants); bit-identical across
/// repeated runs with the same config. Each cell depends only on its own
/// coordinates, so rows are filled in parallel.
pub fn synthesize(cfg: &MapConfig) -> Grid<f64> {
    let noise = NoiseField::new(cfg.seed);
    let size = cfg.size;

    let mut grid = Grid::new_with(size, 0.0f64);
    grid.as_mut_slice()
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = elevation_at(&noise, cfg, x, y);
            }
        });
    grid
}

fn elevation_at(noise: &NoiseField, cfg: &MapConfig, x: usize, y: usize) -> f64 {
    let size = cfg.size as f64;
    let nx = x as f64 / size - 0.5;
    let ny = y as f64 / size - 0.5;

    let mut elevation = 0.0;
    for (weight, frequency) in OCTAVES {
        elevation += weight * noise.normalized(frequency * nx, frequency * ny);
    }

    let center = cfg.center();
    let dx = x as f64 - center;
    let dy = y as f64 - center;
    let d = (dx * dx + dy * dy).sqrt() / cfg.diagonal();

    elevation + cfg.falloff.offset - cfg.falloff.strength * d.powf(cfg.falloff.exponent)
}
