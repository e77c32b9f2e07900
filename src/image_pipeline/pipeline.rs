//! Reduction pipeline module
//!
//! Explicit, caller-built chains of frame stages and the configuration that
//! drives the standard chain.

mod reduction;
mod stage;
pub mod types;

#[cfg(test)]
mod tests;

pub use reduction::ReductionPipeline;
pub use stage::Stage;
pub use types::{ReductionConfig, ReductionConfigBuilder};
