use std::path::Path;

use tracing::info;

use crate::controllers::ports::file_presenter::{FilePresenterPort, PresentError};
use crate::core::actions::render_tiles::errors::RenderError;
use crate::core::actions::render_tiles::ports::accelerator::Accelerator;
use crate::core::actions::render_tiles::render::render_settings;
use crate::core::data::gray_raster::GrayRaster;
use crate::core::data::render_config::RenderSettings;

/// Renders once, then hands the raster to a file presenter.
pub struct RenderController<P: FilePresenterPort, A: Accelerator> {
    presenter: P,
    accelerator: A,
    raster: Option<GrayRaster>,
}

impl<P: FilePresenterPort, A: Accelerator> RenderController<P, A> {
    pub fn new(presenter: P, accelerator: A) -> Self {
        Self {
            presenter,
            accelerator,
            raster: None,
        }
    }

    pub fn generate(&mut self, settings: RenderSettings) -> Result<(), RenderError> {
        self.raster = None;
        self.raster = Some(render_settings(settings, &self.accelerator)?);

        Ok(())
    }

    pub fn raster(&self) -> Option<&GrayRaster> {
        self.raster.as_ref()
    }

    /// Does nothing until [`RenderController::generate`] has succeeded.
    pub fn write(&self, filepath: impl AsRef<Path>) -> Result<(), PresentError> {
        if let Some(raster) = &self.raster {
            let filepath = filepath.as_ref();

            self.presenter.present(raster, filepath)?;
            info!(
                path = %filepath.display(),
                width = raster.width(),
                height = raster.height(),
                "image written"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::accelerator::serial_accelerator::SerialAccelerator;
    use crate::presenters::file::pgm::PgmFilePresenter;

    fn small_settings() -> RenderSettings {
        RenderSettings {
            grid_tiles_x: 2,
            grid_tiles_y: 2,
            tile_px: 4,
            ..RenderSettings::default()
        }
    }

    #[test]
    fn test_write_before_generate_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pgm");
        let controller = RenderController::new(PgmFilePresenter::new(), SerialAccelerator);

        controller.write(&path).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_generate_then_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pgm");
        let mut controller = RenderController::new(PgmFilePresenter::new(), SerialAccelerator);

        controller.generate(small_settings()).unwrap();
        controller.write(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let header = b"P5\n8 8\n255\n";

        assert_eq!(&bytes[..header.len()], header);
        assert_eq!(bytes.len(), header.len() + 64);
        assert_eq!(controller.raster().map(|r| r.width()), Some(8));
    }

    #[test]
    fn test_failed_generate_leaves_no_raster() {
        let mut controller = RenderController::new(PgmFilePresenter::new(), SerialAccelerator);
        controller.generate(small_settings()).unwrap();

        let result = controller.generate(RenderSettings {
            tile_px: 0,
            ..small_settings()
        });

        assert!(matches!(result, Err(RenderError::ConfigInvalid(_))));
        assert!(controller.raster().is_none());
    }
}
