//! Synthetic padded frames for exercising the correction chain.

use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::geometry::regions::GeometryRegions;
use crate::image_pipeline::geometry::types::ReadoutDirection;

/// Constant values written into the non-science bands, `[top, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternLevels {
    pub overscan_row: [f32; 2],
    pub prescan: [f32; 2],
    pub overscan_col: [f32; 2],
}

impl Default for PatternLevels {
    fn default() -> Self {
        Self {
            overscan_row: [3.0, 4.0],
            prescan: [5.0, 6.0],
            overscan_col: [7.0, 8.0],
        }
    }
}

/// Builds a padded frame whose trim blocks hold a column ramp `0..2*nc`.
///
/// The ramp runs backwards for `Mirror` readout, as the amplifiers would
/// deliver it.
pub fn synthesize_pattern(regions: &GeometryRegions, levels: &PatternLevels) -> Frame {
    let (rows, cols) = regions.padded_shape();
    let mut frame = Frame::zeros(rows, cols);

    let width = regions.top.trim.width();
    let ramp: Vec<f32> = match regions.direction {
        ReadoutDirection::Normal => (0..width).map(|c| c as f32).collect(),
        ReadoutDirection::Mirror => (0..width).rev().map(|c| c as f32).collect(),
    };

    for (idx, (_, amp)) in regions.amplifiers().into_iter().enumerate() {
        for row in amp.trim.rows.clone() {
            frame.row_mut(row)[amp.trim.cols.clone()].copy_from_slice(&ramp);
        }
        frame.fill_region(&amp.overscan_row, levels.overscan_row[idx]);
        frame.fill_region(&amp.prescan, levels.prescan[idx]);
        frame.fill_region(&amp.overscan_col, levels.overscan_col[idx]);
    }
    frame
}
