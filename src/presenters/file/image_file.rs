use std::path::Path;

use image::{GrayImage, ImageFormat};

use crate::controllers::ports::file_presenter::{FilePresenterPort, PresentError};
use crate::core::data::gray_raster::GrayRaster;

/// Encodes through the `image` crate, choosing the format from the file
/// extension (png, bmp, tif/tiff).
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFilePresenter {}

impl ImageFilePresenter {
    pub fn new() -> Self {
        Self {}
    }
}

impl FilePresenterPort for ImageFilePresenter {
    fn present(&self, raster: &GrayRaster, filepath: impl AsRef<Path>) -> Result<(), PresentError> {
        let filepath = filepath.as_ref();
        let format = ImageFormat::from_path(filepath)?;

        let image = GrayImage::from_raw(raster.width(), raster.height(), raster.as_bytes().to_vec())
            .ok_or(PresentError::RasterShape {
                width: raster.width(),
                height: raster.height(),
                len: raster.as_bytes().len(),
            })?;

        image.save_with_format(filepath, format)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> GrayRaster {
        let data = (0..16u8).map(|v| v * 16).collect();

        GrayRaster::from_data(4, 4, data).unwrap()
    }

    #[test]
    fn test_png_round_trips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.png");
        let raster = gradient();

        ImageFilePresenter::new().present(&raster, &path).unwrap();

        let decoded = image::open(&path).unwrap().into_luma8();

        assert_eq!(decoded.dimensions(), (4, 4));
        assert_eq!(decoded.as_raw().as_slice(), raster.as_bytes());
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.nope");

        let result = ImageFilePresenter::new().present(&gradient(), &path);

        assert!(matches!(result, Err(PresentError::Image(_))));
        assert!(!path.exists());
    }
}
