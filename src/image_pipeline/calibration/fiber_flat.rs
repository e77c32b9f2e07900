use tracing::{debug, warn};

use crate::image_pipeline::common::diagnostics::{DiagnosticEvent, DiagnosticsSink};
use crate::image_pipeline::common::error::{ReductionError, Result};
use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::pipeline::Stage;

/// Divides extracted spectra by a fiber flat of the same shape.
///
/// Zeros in the flat are not guarded: the quotient carries `inf`/`NaN`
/// through unchanged and only the count is reported.
pub fn apply_fiber_flat(
    rss: &mut Frame,
    flat: &Frame,
    diagnostics: &mut dyn DiagnosticsSink,
) -> Result<usize> {
    if rss.shape() != flat.shape() {
        return Err(ReductionError::shape_mismatch(
            "fiber flat",
            rss.shape(),
            flat.shape(),
        ));
    }
    rss.data_mut()
        .iter_mut()
        .zip(flat.data())
        .for_each(|(v, f)| *v /= f);

    let non_finite = rss.count_non_finite();
    if non_finite > 0 {
        warn!(count = non_finite, "fiber flat produced non-finite samples");
        diagnostics.record(DiagnosticEvent::NonFiniteSamples {
            stage: "fiber_flat".to_string(),
            count: non_finite,
        });
    }
    debug!(fibers = rss.rows(), "applied fiber flat");
    Ok(non_finite)
}

#[derive(Debug, Clone)]
pub struct FiberFlatCorrector {
    flat: Frame,
}

impl FiberFlatCorrector {
    pub fn new(flat: Frame) -> Self {
        Self { flat }
    }
}

impl Stage for FiberFlatCorrector {
    fn name(&self) -> &str {
        "fiber_flat"
    }

    fn apply(&self, mut frame: Frame, diagnostics: &mut dyn DiagnosticsSink) -> Result<Frame> {
        apply_fiber_flat(&mut frame, &self.flat, diagnostics)?;
        Ok(frame)
    }
}
