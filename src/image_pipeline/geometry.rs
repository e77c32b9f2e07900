//! Detector geometry module
//!
//! Named pixel regions of a padded two-amplifier frame, derived from binning
//! and readout direction, plus a synthetic pattern generator for that layout.

mod pattern;
mod regions;
pub mod types;


pub use pattern::{PatternLevels, synthesize_pattern};
pub use regions::{AmplifierRegions, GeometryRegions, compute_regions};
pub use types::{Binning, ReadoutDirection, SensorGeometry};
