use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::image_pipeline::common::diagnostics::{DiagnosticEvent, DiagnosticsSink};
use crate::image_pipeline::common::error::{ReductionError, Result};
use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::extraction::borders::BorderPair;
use crate::image_pipeline::extraction::weights::{FiberWindow, WeightBuffer};
use crate::image_pipeline::pipeline::Stage;

/// How weighted extraction schedules its work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Spread fibers over the rayon pool, one weight buffer per worker.
    pub parallel: bool,
}

fn locate(pair: &BorderPair, col: usize, rows: usize) -> Result<FiberWindow> {
    let (lower, upper) = pair.at(col as f64);
    FiberWindow::locate(lower, upper, rows).ok_or_else(|| {
        ReductionError::ValidationError(format!(
            "fiber {} border [{lower}, {upper}] at column {col} does not fit {rows} rows",
            pair.fiber_id
        ))
    })
}

fn validate(frame: &Frame, borders: &[BorderPair]) -> Result<()> {
    for pair in borders {
        for col in 0..frame.cols() {
            locate(pair, col, frame.rows())?;
        }
    }
    Ok(())
}

fn extract_fiber(
    frame: &Frame,
    pair: &BorderPair,
    buffer: &mut WeightBuffer,
    out: &mut [f32],
) -> Result<()> {
    for (col, slot) in out.iter_mut().enumerate() {
        let window = locate(pair, col, frame.rows())?;
        buffer.fill(&window);
        *slot = buffer.weighted_sum(frame, col) as f32;
        buffer.clear();
    }
    Ok(())
}

/// Extracts one spectrum per border pair with fractional edge weights.
///
/// Borders are evaluated at every frame column, extrapolating past the
/// traces' fitted domain, and every column must land inside the frame rows.
/// All of them are checked before the output is allocated.
#[instrument(skip_all, fields(fibers = borders.len(), rows = frame.rows(), cols = frame.cols()))]
pub fn extract_weighted(frame: &Frame, borders: &[BorderPair]) -> Result<Frame> {
    validate(frame, borders)?;

    let cols = frame.cols();
    let mut rss = Frame::zeros(borders.len(), cols);
    if cols == 0 {
        return Ok(rss);
    }

    let mut buffer = WeightBuffer::new(frame.rows());
    for (pair, out) in borders.iter().zip(rss.data_mut().chunks_exact_mut(cols)) {
        extract_fiber(frame, pair, &mut buffer, out)?;
    }

    debug!("weighted extraction complete");
    Ok(rss)
}

/// Same result as [`extract_weighted`], fibers spread across rayon workers.
#[instrument(skip_all, fields(fibers = borders.len(), rows = frame.rows(), cols = frame.cols()))]
pub fn extract_weighted_parallel(frame: &Frame, borders: &[BorderPair]) -> Result<Frame> {
    validate(frame, borders)?;

    let cols = frame.cols();
    let rows = frame.rows();
    let mut rss = Frame::zeros(borders.len(), cols);
    if cols == 0 {
        return Ok(rss);
    }

    rss.data_mut()
        .par_chunks_mut(cols)
        .zip(borders.par_iter())
        .try_for_each_init(
            || WeightBuffer::new(rows),
            |buffer, (out, pair)| extract_fiber(frame, pair, buffer, out),
        )?;

    debug!("parallel weighted extraction complete");
    Ok(rss)
}

#[derive(Debug, Clone)]
pub struct WeightedApertureExtractor {
    borders: Vec<BorderPair>,
    config: ExtractionConfig,
}

impl WeightedApertureExtractor {
    pub fn new(borders: Vec<BorderPair>, config: ExtractionConfig) -> Self {
        Self { borders, config }
    }

    pub fn borders(&self) -> &[BorderPair] {
        &self.borders
    }
}

impl Stage for WeightedApertureExtractor {
    fn name(&self) -> &str {
        "weighted_extract"
    }

    fn apply(&self, frame: Frame, diagnostics: &mut dyn DiagnosticsSink) -> Result<Frame> {
        let rss = if self.config.parallel {
            extract_weighted_parallel(&frame, &self.borders)?
        } else {
            extract_weighted(&frame, &self.borders)?
        };
        let non_finite = rss.count_non_finite();
        if non_finite > 0 {
            diagnostics.record(DiagnosticEvent::NonFiniteSamples {
                stage: self.name().to_string(),
                count: non_finite,
            });
        }
        Ok(rss)
    }
}
