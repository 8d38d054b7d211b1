use std::path::Path;

use thiserror::Error;

use crate::core::data::gray_raster::GrayRaster;

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("could not write image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("raster of {width}x{height} pixels cannot be encoded from {len} bytes")]
    RasterShape { width: u32, height: u32, len: usize },
}

pub trait FilePresenterPort {
    fn present(&self, raster: &GrayRaster, filepath: impl AsRef<Path>) -> Result<(), PresentError>;
}
