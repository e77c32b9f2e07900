//! Fractional-pixel weights for one fiber window in one column.

use crate::image_pipeline::common::frame::Frame;

/// Pixel index containing a real-valued row position, rounding halves up.
///
/// `pixel_of(2.5) == 3` and `pixel_of(-0.5) == 0`.
pub fn pixel_of(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// A fiber's real row interval `[lower, upper]` and the pixels it touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiberWindow {
    pub lower: f64,
    pub upper: f64,
    pub start: usize,
    pub end: usize,
}

impl FiberWindow {
    /// `None` when the interval is not finite, inverted, or leaves `0..rows`.
    pub fn locate(lower: f64, upper: f64, rows: usize) -> Option<Self> {
        if !lower.is_finite() || !upper.is_finite() || upper < lower {
            return None;
        }
        let start = usize::try_from(pixel_of(lower)).ok()?;
        let end = usize::try_from(pixel_of(upper)).ok()?;
        (end < rows).then_some(Self {
            lower,
            upper,
            start,
            end,
        })
    }
}

/// Scratch weights over every row of a column, owned by one extraction call
/// or one worker.
///
/// Only the last filled window is ever non-zero; it is zeroed again before
/// the next fill and by [`WeightBuffer::clear`].
#[derive(Debug, Clone)]
pub struct WeightBuffer {
    weights: Vec<f64>,
    filled: Option<(usize, usize)>,
}

impl WeightBuffer {
    pub fn new(rows: usize) -> Self {
        Self {
            weights: vec![0.0; rows],
            filled: None,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn filled(&self) -> Option<(usize, usize)> {
        self.filled
    }

    pub fn clear(&mut self) {
        if let Some((start, end)) = self.filled.take() {
            self.weights[start..=end].fill(0.0);
        }
    }

    /// Rasterizes a window.
    ///
    /// The edge pixels take the covered fraction; interior pixels weigh 1.
    /// When both edges land in one pixel it takes the whole `upper - lower`.
    pub fn fill(&mut self, window: &FiberWindow) {
        self.clear();
        let (s, e) = (window.start, window.end);
        let (a, b) = (window.lower, window.upper);

        self.weights[s] = (s as f64 + 0.5).min(b) - a;
        if e > s {
            self.weights[s + 1..e].fill(1.0);
            self.weights[e] = b - (e as f64 - 0.5);
        }
        self.filled = Some((s, e));
    }

    /// Weighted sum of a frame column over the filled window, ascending rows.
    pub fn weighted_sum(&self, frame: &Frame, col: usize) -> f64 {
        let Some((start, end)) = self.filled else {
            return 0.0;
        };
        (start..=end)
            .map(|row| self.weights[row] * frame.get(row, col) as f64)
            .sum()
    }
}
