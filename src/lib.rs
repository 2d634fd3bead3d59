//! Island map generation library
//!
//! Pipeline: seeded noise -> elevation grid -> colored raster, plus a
//! flood-fill landmass pass that feeds auto-placed name labels.

pub mod color;
pub mod config;
pub mod grid;
pub mod labels;
pub mod landmass;
pub mod names;
pub mod noise_field;
pub mod render;
pub mod terrain;
