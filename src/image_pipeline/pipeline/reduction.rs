use tracing::{info, instrument};

use crate::image_pipeline::calibration::{OverscanCorrector, Trimmer};
use crate::image_pipeline::common::diagnostics::{DiagnosticsSink, Timer};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::extraction::{TraceMap, WeightedApertureExtractor, resolve_borders};
use crate::image_pipeline::geometry::compute_regions;
use crate::image_pipeline::pipeline::stage::Stage;
use crate::image_pipeline::pipeline::types::ReductionConfig;

/// Ordered list of stages, applied front to back.
#[derive(Default)]
pub struct ReductionPipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl ReductionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn push(&mut self, stage: Box<dyn Stage>) {
        self.stages.push(stage);
    }

    /// Overscan correction, trimming, then weighted extraction along `traces`.
    pub fn for_traces(config: &ReductionConfig, traces: &TraceMap) -> Result<Self> {
        let regions = compute_regions(config.binning, config.direction, &config.sensor)?;
        let borders = resolve_borders(traces)?;
        Ok(Self::new()
            .with_stage(OverscanCorrector::new(regions.clone()))
            .with_stage(Trimmer::new(regions))
            .with_stage(WeightedApertureExtractor::new(borders, config.extraction)))
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    #[instrument(skip_all, fields(stages = self.stages.len(), rows = frame.rows(), cols = frame.cols()))]
    pub fn run(&self, frame: Frame, diagnostics: &mut dyn DiagnosticsSink) -> Result<Frame> {
        info!("Starting reduction");

        let mut frame = frame;
        for stage in &self.stages {
            let _span = tracing::info_span!("stage", stage = stage.name()).entered();
            let timer = Timer::start(stage.name());
            frame = stage.apply(frame, diagnostics)?;
            diagnostics.record(timer.stop());
        }

        info!(rows = frame.rows(), cols = frame.cols(), "Reduction complete");
        Ok(frame)
    }
}
