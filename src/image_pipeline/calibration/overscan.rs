use tracing::{debug, instrument};

use crate::image_pipeline::common::diagnostics::{BiasLevel, DiagnosticEvent, DiagnosticsSink};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::geometry::GeometryRegions;
use crate::image_pipeline::pipeline::Stage;

/// Subtracts a per-amplifier bias level from the trim blocks, in place.
///
/// Each half's level is the mean of its prescan, overscan-row and
/// overscan-column means; halves are never pooled.
#[instrument(skip_all, fields(rows = frame.rows(), cols = frame.cols()))]
pub fn correct_overscan(
    frame: &mut Frame,
    regions: &GeometryRegions,
    diagnostics: &mut dyn DiagnosticsSink,
) -> Result<[BiasLevel; 2]> {
    regions.check_padded(frame.shape())?;

    // Estimate both halves before touching any pixel.
    let levels = regions.amplifiers().map(|(amplifier, amp)| {
        let prescan = frame.region_mean(&amp.prescan);
        let overscan_row = frame.region_mean(&amp.overscan_row);
        let overscan_col = frame.region_mean(&amp.overscan_col);
        let level = (prescan + overscan_row + overscan_col) / 3.0;
        debug!(
            ?amplifier,
            prescan, overscan_row, overscan_col, level, "bias estimate"
        );
        BiasLevel {
            amplifier,
            prescan,
            overscan_row,
            overscan_col,
            level,
        }
    });

    for bias in &levels {
        frame.offset_region(&regions.amplifier(bias.amplifier).trim, bias.level as f32);
        diagnostics.record(DiagnosticEvent::Bias(*bias));
    }

    Ok(levels)
}

/// Pipeline stage wrapping [`correct_overscan`].
#[derive(Debug, Clone)]
pub struct OverscanCorrector {
    regions: GeometryRegions,
}

impl OverscanCorrector {
    pub fn new(regions: GeometryRegions) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &GeometryRegions {
        &self.regions
    }
}

impl Stage for OverscanCorrector {
    fn name(&self) -> &str {
        "overscan"
    }

    fn apply(&self, mut frame: Frame, diagnostics: &mut dyn DiagnosticsSink) -> Result<Frame> {
        correct_overscan(&mut frame, &self.regions, diagnostics)?;
        Ok(frame)
    }
}
