use crate::image_pipeline::common::diagnostics::DiagnosticsSink;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::frame::Frame;

/// One step of a reduction: takes a frame, returns the transformed frame.
pub trait Stage {
    fn name(&self) -> &str;
    fn apply(&self, frame: Frame, diagnostics: &mut dyn DiagnosticsSink) -> Result<Frame>;
}
