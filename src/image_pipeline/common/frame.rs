//! Row-major detector frame and rectangular pixel regions

use std::ops::Range;

use crate::image_pipeline::common::error::{ReductionError, Result};

/// A rectangular block of pixel indices, half-open on both axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl Region {
    pub fn new(rows: Range<usize>, cols: Range<usize>) -> Self {
        Self { rows, cols }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.cols.len()
    }

    pub fn len(&self) -> usize {
        self.height() * self.width()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overlaps(&self, other: &Region) -> bool {
        let rows = self.rows.start.max(other.rows.start) < self.rows.end.min(other.rows.end);
        let cols = self.cols.start.max(other.cols.start) < self.cols.end.min(other.cols.end);
        rows && cols
    }

    /// True when the region lies inside a frame of the given shape.
    pub fn fits_within(&self, shape: (usize, usize)) -> bool {
        self.rows.end <= shape.0 && self.cols.end <= shape.1
    }
}

/// Single-precision 2D frame, `rows x cols`, stored row-major.
///
/// Extracted spectra use the same type with one row per fiber.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Frame {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            ReductionError::ValidationError(format!("frame size overflow: {rows}x{cols}"))
        })?;
        if data.len() != expected {
            return Err(ReductionError::ValidationError(format!(
                "frame data length {} does not match {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f32] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Arithmetic mean of a region, accumulated in double precision.
    ///
    /// An empty region yields NaN.
    pub fn region_mean(&self, region: &Region) -> f64 {
        let mut sum = 0.0f64;
        for row in region.rows.clone() {
            sum += self.row(row)[region.cols.clone()]
                .iter()
                .map(|&v| v as f64)
                .sum::<f64>();
        }
        sum / region.len() as f64
    }

    pub fn fill_region(&mut self, region: &Region, value: f32) {
        for row in region.rows.clone() {
            self.row_mut(row)[region.cols.clone()].fill(value);
        }
    }

    /// Subtracts a scalar from every pixel of a region.
    pub fn offset_region(&mut self, region: &Region, delta: f32) {
        for row in region.rows.clone() {
            self.row_mut(row)[region.cols.clone()]
                .iter_mut()
                .for_each(|v| *v -= delta);
        }
    }

    /// Copies a region into a new frame.
    pub fn sub_frame(&self, region: &Region) -> Frame {
        let mut data = Vec::with_capacity(region.len());
        for row in region.rows.clone() {
            data.extend_from_slice(&self.row(row)[region.cols.clone()]);
        }
        Frame {
            rows: region.height(),
            cols: region.width(),
            data,
        }
    }

    /// Reverses the column order of every row.
    pub fn flip_columns(&mut self) {
        if self.cols == 0 {
            return;
        }
        self.data
            .chunks_exact_mut(self.cols)
            .for_each(|row| row.reverse());
    }

    pub fn count_non_finite(&self) -> usize {
        self.data.iter().filter(|v| !v.is_finite()).count()
    }
}
