use tracing::debug;

use crate::image_pipeline::common::diagnostics::DiagnosticsSink;
use crate::image_pipeline::common::error::{ReductionError, Result};
use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::pipeline::Stage;

/// Pixel-by-pixel master bias subtraction.
pub fn subtract_bias(frame: &mut Frame, master: &Frame) -> Result<()> {
    if frame.shape() != master.shape() {
        return Err(ReductionError::shape_mismatch(
            "master bias",
            frame.shape(),
            master.shape(),
        ));
    }
    frame
        .data_mut()
        .iter_mut()
        .zip(master.data())
        .for_each(|(v, b)| *v -= b);
    debug!(rows = frame.rows(), cols = frame.cols(), "subtracted master bias");
    Ok(())
}

#[derive(Debug, Clone)]
pub struct BiasCorrector {
    master: Frame,
}

impl BiasCorrector {
    pub fn new(master: Frame) -> Self {
        Self { master }
    }
}

impl Stage for BiasCorrector {
    fn name(&self) -> &str {
        "bias"
    }

    fn apply(&self, mut frame: Frame, _diagnostics: &mut dyn DiagnosticsSink) -> Result<Frame> {
        subtract_bias(&mut frame, &self.master)?;
        Ok(frame)
    }
}
