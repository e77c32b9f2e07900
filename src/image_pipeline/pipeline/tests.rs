use std::io;
use std::sync::{Arc, Mutex};

use crate::image_pipeline::calibration::{BiasCorrector, OverscanCorrector, Trimmer};
use crate::image_pipeline::common::diagnostics::{
    Diagnostics, DiagnosticsSink, NullSink, TracingSink,
};
use crate::image_pipeline::common::error::{ReductionError, Result};
use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::extraction::{ApertureWindow, BoxApertureExtractor, Trace, TraceMap};
use crate::image_pipeline::geometry::{
    Binning, PatternLevels, ReadoutDirection, SensorGeometry, compute_regions, synthesize_pattern,
};
use crate::image_pipeline::pipeline::{ReductionConfig, ReductionPipeline, Stage};

struct MockStage {
    name: &'static str,
    should_fail: bool,
    seen: Arc<Mutex<Vec<&'static str>>>,
}

impl Stage for MockStage {
    fn name(&self) -> &str {
        self.name
    }

    fn apply(&self, mut frame: Frame, _diagnostics: &mut dyn DiagnosticsSink) -> Result<Frame> {
        self.seen.lock().unwrap().push(self.name);
        if self.should_fail {
            return Err(ReductionError::ValidationError("Mock stage error".to_string()));
        }
        frame.data_mut().iter_mut().for_each(|v| *v += 1.0);
        Ok(frame)
    }
}

fn mock(name: &'static str, should_fail: bool, seen: &Arc<Mutex<Vec<&'static str>>>) -> MockStage {
    MockStage {
        name,
        should_fail,
        seen: seen.clone(),
    }
}

fn small_sensor() -> SensorGeometry {
    SensorGeometry {
        sensor_rows: 20,
        sensor_cols: 4,
        overscan_width: 4,
        prescan_width: 2,
    }
}

#[test]
fn test_config_builder() {
    let config = ReductionConfig::builder()
        .binning(Binning::TwoByTwo)
        .direction(ReadoutDirection::Mirror)
        .parallel(true)
        .build();

    assert_eq!(config.binning, Binning::TwoByTwo);
    assert_eq!(config.direction, ReadoutDirection::Mirror);
    assert!(config.extraction.parallel);
    assert_eq!(config.sensor, SensorGeometry::default());
}

#[test]
fn test_config_builder_defaults() {
    let config = ReductionConfig::builder().build();
    assert_eq!(config, ReductionConfig::default());
    assert_eq!(config.binning, Binning::OneByOne);
    assert_eq!(config.direction, ReadoutDirection::Normal);
    assert!(!config.extraction.parallel);
}

#[test]
fn test_stages_run_in_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let pipeline = ReductionPipeline::new()
        .with_stage(mock("first", false, &seen))
        .with_stage(mock("second", false, &seen))
        .with_stage(mock("third", false, &seen));

    let mut diagnostics = Diagnostics::new();
    let out = pipeline.run(Frame::zeros(2, 2), &mut diagnostics).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
    assert!(out.data().iter().all(|&v| v == 3.0));
    assert_eq!(diagnostics.stage_names(), vec!["first", "second", "third"]);
    assert!(diagnostics.get_step("second").is_some());
    assert!(diagnostics.get_step("missing").is_none());
}

#[test]
fn test_stage_failure_stops_pipeline() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let pipeline = ReductionPipeline::new()
        .with_stage(mock("first", false, &seen))
        .with_stage(mock("broken", true, &seen))
        .with_stage(mock("never", false, &seen));

    let result = pipeline.run(Frame::zeros(1, 1), &mut NullSink);

    assert!(matches!(result, Err(ReductionError::ValidationError(_))));
    assert_eq!(*seen.lock().unwrap(), vec!["first", "broken"]);
}

#[test]
fn test_empty_pipeline_passes_frame_through() {
    let pipeline = ReductionPipeline::new();
    assert!(pipeline.is_empty());
    let frame = Frame::filled(3, 3, 4.0);
    let out = pipeline.run(frame.clone(), &mut NullSink).unwrap();
    assert_eq!(out, frame);
}

#[test]
fn test_for_traces_end_to_end() {
    let config = ReductionConfig::builder().sensor(small_sensor()).build();
    let regions = compute_regions(config.binning, config.direction, &config.sensor).unwrap();
    assert_eq!(regions.trimmed_shape(), (40, 8));

    let raw = synthesize_pattern(&regions, &PatternLevels::default());
    let traces: TraceMap = [10.0, 20.0, 30.0]
        .iter()
        .enumerate()
        .map(|(id, &c)| Trace::new(id, vec![c], 0..8))
        .collect();

    let pipeline = ReductionPipeline::for_traces(&config, &traces).unwrap();
    assert_eq!(
        pipeline.stage_names(),
        vec!["overscan", "trim", "weighted_extract"]
    );

    let mut diagnostics = Diagnostics::new();
    let rss = pipeline.run(raw, &mut diagnostics).unwrap();

    assert_eq!(rss.shape(), (3, 8));
    for col in 0..8 {
        let c = col as f32;
        // fiber 0 lies in the top half, fiber 2 in the bottom half,
        // fiber 1 straddles the join: 4.5 rows top, 5.5 rows bottom.
        assert_eq!(rss.get(0, col), (c - 5.0) * 10.0);
        assert_eq!(rss.get(1, col), 10.0 * c - 55.5);
        assert_eq!(rss.get(2, col), (c - 6.0) * 10.0);
    }

    assert_eq!(diagnostics.bias_levels().count(), 2);
    assert_eq!(diagnostics.stage_names().len(), 3);
}

#[test]
fn test_for_traces_parallel_mirror_matches_normal() {
    let traces: TraceMap = [8.0, 19.5, 31.25]
        .iter()
        .enumerate()
        .map(|(id, &c)| Trace::new(id, vec![0.05, c], 0..8))
        .collect();

    let mut outputs = Vec::new();
    for (direction, parallel) in [
        (ReadoutDirection::Normal, false),
        (ReadoutDirection::Mirror, true),
    ] {
        let config = ReductionConfig::builder()
            .sensor(small_sensor())
            .direction(direction)
            .parallel(parallel)
            .build();
        let regions = compute_regions(config.binning, config.direction, &config.sensor).unwrap();
        let raw = synthesize_pattern(&regions, &PatternLevels::default());
        let pipeline = ReductionPipeline::for_traces(&config, &traces).unwrap();
        outputs.push(pipeline.run(raw, &mut NullSink).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_for_traces_rejects_bad_trace_map() {
    let config = ReductionConfig::builder().sensor(small_sensor()).build();
    let traces = TraceMap::new(vec![Trace::new(0, vec![10.0], 0..8)]);
    let result = ReductionPipeline::for_traces(&config, &traces);
    assert!(matches!(result, Err(ReductionError::ValidationError(_))));
}

#[test]
fn test_hand_built_box_chain_with_bias() {
    let regions = compute_regions(
        Binning::OneByOne,
        ReadoutDirection::Normal,
        &small_sensor(),
    )
    .unwrap();
    let raw = synthesize_pattern(&regions, &PatternLevels::default());
    let (rows, cols) = regions.trimmed_shape();

    let pipeline = ReductionPipeline::new()
        .with_stage(OverscanCorrector::new(regions.clone()))
        .with_stage(Trimmer::new(regions.clone()))
        .with_stage(BiasCorrector::new(Frame::filled(rows, cols, 1.0)))
        .with_stage(BoxApertureExtractor::new(vec![
            ApertureWindow::new(0, 9),
            ApertureWindow::new(30, 39),
        ]));
    assert_eq!(pipeline.len(), 4);

    let rss = pipeline.run(raw, &mut NullSink).unwrap();
    assert_eq!(rss.shape(), (2, cols));
    for col in 0..cols {
        let c = col as f32;
        assert_eq!(rss.get(0, col), (c - 6.0) * 10.0);
        assert_eq!(rss.get(1, col), (c - 7.0) * 10.0);
    }
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_tracing_sink_logs_pipeline_events() {
    let config = ReductionConfig::builder().sensor(small_sensor()).build();
    let regions = compute_regions(config.binning, config.direction, &config.sensor).unwrap();
    let raw = synthesize_pattern(&regions, &PatternLevels::default());
    let traces: TraceMap = [10.0, 20.0, 30.0]
        .iter()
        .enumerate()
        .map(|(id, &c)| Trace::new(id, vec![c], 0..8))
        .collect();
    let pipeline = ReductionPipeline::for_traces(&config, &traces).unwrap();

    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let rss = tracing::subscriber::with_default(subscriber, || {
        pipeline.run(raw.clone(), &mut TracingSink).unwrap()
    });
    let expected = pipeline.run(raw, &mut NullSink).unwrap();
    assert_eq!(rss, expected);

    let text = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    assert_eq!(text.matches("bias level").count(), 2);
    assert_eq!(text.matches("stage finished").count(), 3);
    assert!(text.contains("weighted_extract"));
}
