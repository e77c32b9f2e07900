//! Spectral extraction module
//!
//! Turns a trimmed frame into row-stacked spectra, either by summing fixed
//! integer row windows or by weighting pixels fractionally between border
//! curves resolved from fitted fiber traces.

mod borders;
mod box_aperture;
mod polynomial;
mod trace;
mod weighted;
mod weights;


pub use borders::{BorderPair, resolve_borders};
pub use box_aperture::{ApertureWindow, BoxApertureExtractor, extract_box};
pub use polynomial::Polynomial;
pub use trace::{Trace, TraceMap};
pub use weighted::{
    ExtractionConfig, WeightedApertureExtractor, extract_weighted, extract_weighted_parallel,
};
pub use weights::{FiberWindow, WeightBuffer, pixel_of};
