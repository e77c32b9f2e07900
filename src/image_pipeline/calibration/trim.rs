use tracing::debug;

use crate::image_pipeline::common::diagnostics::DiagnosticsSink;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::geometry::{GeometryRegions, ReadoutDirection};
use crate::image_pipeline::pipeline::Stage;

/// Cuts both trim blocks out of a padded frame and stacks them, top first.
///
/// Mirror readout is flipped back to normal column order. A frame that is
/// not the padded shape (for instance one already trimmed) is rejected.
pub fn trim(frame: &Frame, regions: &GeometryRegions) -> Result<Frame> {
    regions.check_padded(frame.shape())?;

    let (rows, cols) = regions.trimmed_shape();
    let mut data = Vec::with_capacity(rows * cols);
    for (_, amp) in regions.amplifiers() {
        data.extend(frame.sub_frame(&amp.trim).into_vec());
    }
    let mut trimmed = Frame::from_vec(rows, cols, data)?;

    if regions.direction == ReadoutDirection::Mirror {
        trimmed.flip_columns();
    }

    debug!(rows, cols, direction = ?regions.direction, "trimmed frame");
    Ok(trimmed)
}

/// Pipeline stage wrapping [`trim`].
#[derive(Debug, Clone)]
pub struct Trimmer {
    regions: GeometryRegions,
}

impl Trimmer {
    pub fn new(regions: GeometryRegions) -> Self {
        Self { regions }
    }
}

impl Stage for Trimmer {
    fn name(&self) -> &str {
        "trim"
    }

    fn apply(&self, frame: Frame, _diagnostics: &mut dyn DiagnosticsSink) -> Result<Frame> {
        trim(&frame, &self.regions)
    }
}
