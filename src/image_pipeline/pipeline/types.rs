//! Reduction configuration types

use crate::image_pipeline::extraction::ExtractionConfig;
use crate::image_pipeline::geometry::{Binning, ReadoutDirection, SensorGeometry};

/// Everything needed to lay out and reduce one detector frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReductionConfig {
    pub binning: Binning,
    pub direction: ReadoutDirection,
    pub sensor: SensorGeometry,
    pub extraction: ExtractionConfig,
}

impl ReductionConfig {
    pub fn builder() -> ReductionConfigBuilder {
        ReductionConfigBuilder::default()
    }
}

/// Builder for ReductionConfig
#[derive(Default)]
pub struct ReductionConfigBuilder {
    binning: Option<Binning>,
    direction: Option<ReadoutDirection>,
    sensor: Option<SensorGeometry>,
    parallel: Option<bool>,
}

impl ReductionConfigBuilder {
    pub fn binning(mut self, binning: Binning) -> Self {
        self.binning = Some(binning);
        self
    }

    pub fn direction(mut self, direction: ReadoutDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn sensor(mut self, sensor: SensorGeometry) -> Self {
        self.sensor = Some(sensor);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn build(self) -> ReductionConfig {
        let default = ReductionConfig::default();
        ReductionConfig {
            binning: self.binning.unwrap_or(default.binning),
            direction: self.direction.unwrap_or(default.direction),
            sensor: self.sensor.unwrap_or(default.sensor),
            extraction: ExtractionConfig {
                parallel: self.parallel.unwrap_or(default.extraction.parallel),
            },
        }
    }
}
