use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ReductionError};
use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::tiff::types::{ExportConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::TiffWriter;

/// Writes frames as single-channel 32-bit float TIFF.
pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_frame(&self, frame: &Frame, output: &mut dyn Write, config: &ExportConfig) -> Result<()> {
        debug!("Encoding TIFF frame: {}x{}", frame.cols(), frame.rows());

        let width = u32::try_from(frame.cols())
            .map_err(|_| ReductionError::EncodeError(format!("width {} too large", frame.cols())))?;
        let height = u32::try_from(frame.rows())
            .map_err(|_| ReductionError::EncodeError(format!("height {} too large", frame.rows())))?;

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ReductionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        encoder.write_image::<tiff::encoder::colortype::Gray32Float>(
            width,
            height,
            frame.data(),
        ).map_err(|e| ReductionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
