//! Common utilities module
//!
//! Shared frame type, error taxonomy and diagnostics sinks used across the
//! reduction pipeline.

pub mod diagnostics;
pub mod error;
pub mod frame;

pub use diagnostics::{
    Amplifier, BiasLevel, DiagnosticEvent, Diagnostics, DiagnosticsSink, NullSink, Timer,
    TracingSink,
};
pub use error::{ReductionError, Result};
pub use frame::{Frame, Region};
