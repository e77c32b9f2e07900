use std::io::Write;
use std::path::Path;

use crate::image_pipeline::common::error::{ReductionError, Result};
use crate::image_pipeline::common::frame::Frame;
use crate::image_pipeline::tiff::types::ExportConfig;

pub trait TiffWriter {
    fn write_frame(&self, frame: &Frame, output: &mut dyn Write, config: &ExportConfig) -> Result<()>;

    fn write_file(&self, frame: &Frame, path: &Path, config: &ExportConfig) -> Result<()> {
        let mut file = std::fs::File::create(path).map_err(|e| {
            ReductionError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        self.write_frame(frame, &mut file, config)
    }
}
