//! Run configuration
//!
//! One immutable `MapConfig` is built in `main` and passed by reference
//! through the whole pipeline; nothing reads generation parameters from
//! anywhere else.

use std::error::Error;
use std::fmt;

/// Elevation above which a cell counts as land.
///
/// Tuned against the un-renormalized octave mix in `terrain`; changing one
/// without the other shifts every coastline.
pub const LAND_THRESHOLD: f64 = 0.4;

/// Radial island-shaping term: `elevation + offset - strength * d^exponent`,
/// where d is the distance from the map center normalized by the diagonal.
#[derive(Clone, Copy, Debug)]
pub struct FalloffParams {
    /// Constant lift applied everywhere
    pub offset: f64,
    /// How hard elevation drops toward the edges
    pub strength: f64,
    /// Falloff curve shape (2.0 = quadratic bowl)
    pub exponent: f64,
}

impl Default for FalloffParams {
    fn default() -> Self {
        Self {
            offset: 0.05,
            strength: 4.0,
            exponent: 2.0,
        }
    }
}

/// Parameters for one generation run.
#[derive(Clone, Debug)]
pub struct MapConfig {
    /// Side length of the square map in cells/pixels
    pub size: usize,
    /// Seed shared by the noise field and the name RNG
    pub seed: u64,
    /// Land/water threshold applied to the elevation grid
    pub land_threshold: f64,
    pub falloff: FalloffParams,
}

impl MapConfig {
    pub fn new(size: usize, seed: u64) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidSize(size));
        }
        Ok(Self {
            size,
            seed,
            land_threshold: LAND_THRESHOLD,
            falloff: FalloffParams::default(),
        })
    }

    /// Map center coordinate on both axes.
    pub fn center(&self) -> f64 {
        self.size as f64 / 2.0
    }

    /// Length of the map diagonal, used to normalize radial distance.
    pub fn diagonal(&self) -> f64 {
        (2.0 * (self.size * self.size) as f64).sqrt()
    }

    /// Total cell count.
    pub fn area(&self) -> usize {
        self.size * self.size
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidSize(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSize(size) => {
                write!(f, "map size must be a positive number of pixels, got {}", size)
            }
        }
    }
}

impl Error for ConfigError {}
