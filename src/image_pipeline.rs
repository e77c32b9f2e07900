//! Detector reduction pipeline module
//!
//! This module turns raw two-amplifier spectrograph frames into row-stacked
//! fiber spectra: geometry, bias/trim calibration, extraction, and the stage
//! pipeline that chains them. TIFF export lives alongside for callers that
//! need to dump results.

pub mod calibration;
pub mod common;
pub mod extraction;
pub mod geometry;
pub mod pipeline;
pub mod tiff;

pub use common::{
    Amplifier,
    BiasLevel,
    DiagnosticEvent,
    Diagnostics,
    DiagnosticsSink,
    Frame,
    NullSink,
    ReductionError,
    Region,
    Result,
    TracingSink,
};

pub use geometry::{
    AmplifierRegions,
    Binning,
    GeometryRegions,
    PatternLevels,
    ReadoutDirection,
    SensorGeometry,
    compute_regions,
    synthesize_pattern,
};

pub use calibration::{
    BiasCorrector,
    FiberFlatCorrector,
    OverscanCorrector,
    Trimmer,
    apply_fiber_flat,
    correct_overscan,
    subtract_bias,
    trim,
};

pub use extraction::{
    ApertureWindow,
    BorderPair,
    BoxApertureExtractor,
    ExtractionConfig,
    Polynomial,
    Trace,
    TraceMap,
    WeightedApertureExtractor,
    extract_box,
    extract_weighted,
    extract_weighted_parallel,
    resolve_borders,
};

pub use pipeline::{
    ReductionConfig,
    ReductionConfigBuilder,
    ReductionPipeline,
    Stage,
};

pub use tiff::{
    ExportConfig,
    StandardTiffWriter,
    TiffCompression,
    TiffWriter,
};
