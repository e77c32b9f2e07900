use tracing::debug;

use crate::image_pipeline::common::diagnostics::DiagnosticsSink;
use crate::image_pipeline::common::error::{ReductionError, Result};
use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::pipeline::Stage;

/// Inclusive integer row window `[start, end]` of one fiber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApertureWindow {
    pub start: usize,
    pub end: usize,
}

impl ApertureWindow {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn height(&self) -> usize {
        self.end + 1 - self.start
    }
}

/// Sums whole rows per fiber: the fast, constant-weight extraction path.
pub fn extract_box(frame: &Frame, windows: &[ApertureWindow]) -> Result<Frame> {
    for (idx, w) in windows.iter().enumerate() {
        if w.start > w.end || w.end >= frame.rows() {
            return Err(ReductionError::ConfigError(format!(
                "window {idx} [{}, {}] outside frame of {} rows",
                w.start,
                w.end,
                frame.rows()
            )));
        }
    }

    let cols = frame.cols();
    let mut rss = Frame::zeros(windows.len(), cols);
    let mut acc = vec![0.0f64; cols];
    for (idx, w) in windows.iter().enumerate() {
        acc.fill(0.0);
        for row in w.start..=w.end {
            acc.iter_mut()
                .zip(frame.row(row))
                .for_each(|(a, &v)| *a += v as f64);
        }
        rss.row_mut(idx)
            .iter_mut()
            .zip(&acc)
            .for_each(|(o, &a)| *o = a as f32);
    }

    debug!(fibers = windows.len(), cols, "box extraction complete");
    Ok(rss)
}

#[derive(Debug, Clone)]
pub struct BoxApertureExtractor {
    windows: Vec<ApertureWindow>,
}

impl BoxApertureExtractor {
    pub fn new(windows: Vec<ApertureWindow>) -> Self {
        Self { windows }
    }
}

impl Stage for BoxApertureExtractor {
    fn name(&self) -> &str {
        "box_extract"
    }

    fn apply(&self, frame: Frame, _diagnostics: &mut dyn DiagnosticsSink) -> Result<Frame> {
        extract_box(&frame, &self.windows)
    }
}
