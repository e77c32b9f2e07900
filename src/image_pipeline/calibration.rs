//! Frame calibration module
//!
//! Bias-level removal from overscan bands, trimming to science pixels, master
//! bias subtraction and fiber-flat division.

mod bias;
mod fiber_flat;
mod overscan;
mod trim;


pub use bias::{BiasCorrector, subtract_bias};
pub use fiber_flat::{FiberFlatCorrector, apply_fiber_flat};
pub use overscan::{OverscanCorrector, correct_overscan};
pub use trim::{Trimmer, trim};
