use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fiber_rss_rs::image_pipeline::{
    ApertureWindow, Frame, Trace, TraceMap, extract_box, extract_weighted,
    extract_weighted_parallel, resolve_borders,
};

const ROWS: usize = 2000;

fn generate_frame(rows: usize, cols: usize) -> Frame {
    let data = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| ((r * 7 + c * 3) % 251) as f32))
        .collect();
    Frame::from_vec(rows, cols, data).expect("frame size")
}

fn generate_traces(fibers: usize, cols: usize) -> TraceMap {
    // keep clear of the last rows, the curvature lifts traces by ~13 rows
    let spacing = (ROWS - 40) as f64 / (fibers + 1) as f64;
    (0..fibers)
        .map(|f| {
            let center = spacing * (f + 1) as f64;
            Trace::new(f, vec![1e-6, -1e-3, center], 0..cols)
        })
        .collect()
}

fn benchmark_extraction_by_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction_by_width");

    let widths = vec![(256, "256"), (1024, "1024"), (4096, "4096")];

    for (cols, label) in widths {
        let frame = generate_frame(ROWS, cols);
        let borders = resolve_borders(&generate_traces(100, cols)).expect("borders");

        group.bench_with_input(BenchmarkId::new("weighted", label), &frame, |b, frame| {
            b.iter(|| extract_weighted(black_box(frame), black_box(&borders)));
        });

        group.bench_with_input(
            BenchmarkId::new("weighted_parallel", label),
            &frame,
            |b, frame| {
                b.iter(|| extract_weighted_parallel(black_box(frame), black_box(&borders)));
            },
        );
    }

    group.finish();
}

fn benchmark_box_extraction(c: &mut Criterion) {
    let cols = 1024;
    let frame = generate_frame(ROWS, cols);
    let windows: Vec<ApertureWindow> = (0..100)
        .map(|f| ApertureWindow::new(f * 19 + 5, f * 19 + 20))
        .collect();

    c.bench_function("box_extraction_1024", |b| {
        b.iter(|| extract_box(black_box(&frame), black_box(&windows)));
    });
}

criterion_group!(benches, benchmark_extraction_by_width, benchmark_box_extraction);
criterion_main!(benches);
