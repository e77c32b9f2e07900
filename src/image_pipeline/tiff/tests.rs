use std::io::{self, Cursor, Write};

use crate::image_pipeline::common::error::ReductionError;
use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::tiff::{ExportConfig, StandardTiffWriter, TiffCompression, TiffWriter};

fn sample_frame() -> Frame {
    let data = (0..12).map(|v| v as f32 * 0.5 - 1.0).collect();
    Frame::from_vec(3, 4, data).unwrap()
}

fn decode(bytes: Vec<u8>) -> (u32, u32, Vec<f32>) {
    let mut decoder = tiff::decoder::Decoder::new(Cursor::new(bytes)).unwrap();
    let (width, height) = decoder.dimensions().unwrap();
    match decoder.read_image().unwrap() {
        tiff::decoder::DecodingResult::F32(data) => (width, height, data),
        _ => panic!("expected 32-bit float samples"),
    }
}

#[test]
fn test_write_frame_roundtrips_through_decoder() {
    let frame = sample_frame();
    let mut output = Vec::new();
    StandardTiffWriter
        .write_frame(&frame, &mut output, &ExportConfig::default())
        .unwrap();

    let (width, height, data) = decode(output);
    assert_eq!((width, height), (4, 3));
    assert_eq!(data, frame.data());
}

#[test]
fn test_write_frame_with_lzw() {
    let frame = sample_frame();
    let mut output = Vec::new();
    StandardTiffWriter
        .write_frame(
            &frame,
            &mut output,
            &ExportConfig::with_compression(TiffCompression::Lzw),
        )
        .unwrap();

    let (_, _, data) = decode(output);
    assert_eq!(data, frame.data());
}

#[test]
fn test_write_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rss.tiff");
    StandardTiffWriter
        .write_file(&sample_frame(), &path, &ExportConfig::default())
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let (width, height, _) = decode(bytes);
    assert_eq!((width, height), (4, 3));
}

#[test]
fn test_write_file_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("rss.tiff");
    let result = StandardTiffWriter.write_file(&sample_frame(), &path, &ExportConfig::default());
    assert!(matches!(result, Err(ReductionError::OutputWriteError(_))));
}

struct FailingOutput;

impl Write for FailingOutput {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "Mock output error"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_frame_surfaces_output_io_error() {
    let result = StandardTiffWriter.write_frame(
        &sample_frame(),
        &mut FailingOutput,
        &ExportConfig::default(),
    );
    match result {
        Err(ReductionError::IoError(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected IoError, got {other:?}"),
    }
}
