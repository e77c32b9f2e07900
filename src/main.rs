use std::path::PathBuf;

use fiber_rss_rs::image_pipeline::{
    Binning, Diagnostics, ExportConfig, PatternLevels, ReadoutDirection, ReductionConfig,
    ReductionPipeline, StandardTiffWriter, TiffCompression, TiffWriter, Trace, TraceMap,
    compute_regions, synthesize_pattern,
};
use fiber_rss_rs::logger;

use tracing::{error, info};

const FIBERS: usize = 100;

/// Evenly spaced, gently curved traces filling the trimmed frame.
fn synthetic_traces(rows: usize, cols: usize) -> TraceMap {
    let spacing = rows as f64 / (FIBERS + 1) as f64;
    let mid = cols as f64 / 2.0;
    let curvature = 1e-6;
    (0..FIBERS)
        .map(|fiber| {
            let center = spacing * (fiber + 1) as f64;
            let coeffs = vec![
                curvature,
                -2.0 * curvature * mid,
                curvature * mid * mid + center,
            ];
            Trace::new(fiber, coeffs, 0..cols)
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting fiber_rss...");

    let mut args = std::env::args().skip(1);
    let output = PathBuf::from(args.next().unwrap_or_else(|| "rss.tiff".to_string()));
    let binning: Binning = args.next().as_deref().unwrap_or("11").parse()?;
    let direction: ReadoutDirection = args.next().as_deref().unwrap_or("normal").parse()?;

    let config = ReductionConfig::builder()
        .binning(binning)
        .direction(direction)
        .parallel(true)
        .build();

    info!("Binning: {}", config.binning);
    info!("Direction: {:?}", config.direction);

    let regions = compute_regions(config.binning, config.direction, &config.sensor)?;
    let raw = synthesize_pattern(&regions, &PatternLevels::default());
    let (rows, cols) = regions.trimmed_shape();
    let traces = synthetic_traces(rows, cols);

    let pipeline = ReductionPipeline::for_traces(&config, &traces)?;
    info!("Pipeline stages: {:?}", pipeline.stage_names());

    let mut diagnostics = Diagnostics::new();
    let rss = pipeline.run(raw, &mut diagnostics)?;
    diagnostics.print_summary();

    match StandardTiffWriter.write_file(
        &rss,
        &output,
        &ExportConfig::with_compression(TiffCompression::DeflateFast),
    ) {
        Ok(_) => info!("Wrote {}x{} spectra to {}", rss.rows(), rss.cols(), output.display()),
        Err(e) => error!("Export failed: {}", e),
    }

    Ok(())
}
