use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::controllers::ports::file_presenter::{FilePresenterPort, PresentError};
use crate::core::data::gray_raster::GrayRaster;

/// Writes binary greymap (P5) files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgmFilePresenter {}

impl PgmFilePresenter {
    pub fn new() -> Self {
        Self {}
    }
}

impl FilePresenterPort for PgmFilePresenter {
    fn present(&self, raster: &GrayRaster, filepath: impl AsRef<Path>) -> Result<(), PresentError> {
        let mut file = BufWriter::new(File::create(filepath)?);

        // PGM header: P5 means binary greyscale, then width, height and max value
        writeln!(file, "P5")?;
        writeln!(file, "{} {}", raster.width(), raster.height())?;
        writeln!(file, "255")?;
        file.write_all(raster.as_bytes())?;
        file.flush()?;

        Ok(())
    }
}
