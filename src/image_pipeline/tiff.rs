//! TIFF writing module
//!
//! Dumps frames and spectra to single-channel float TIFF files. The reduction
//! stages never call into this; it serves the binary and external callers.

mod writer;
mod standard_tiff_writer;
pub mod types;

#[cfg(test)]
mod tests;

pub use writer::TiffWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, ExportConfig};
