use std::path::Path;

use crate::controllers::ports::file_presenter::{FilePresenterPort, PresentError};
use crate::core::data::gray_raster::GrayRaster;
use crate::presenters::file::image_file::ImageFilePresenter;
use crate::presenters::file::pgm::PgmFilePresenter;

/// Picks the encoder from the file extension: `.pgm` is written directly,
/// everything else goes through [`ImageFilePresenter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoFilePresenter {
    pgm: PgmFilePresenter,
    image: ImageFilePresenter,
}

impl AutoFilePresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_pgm(filepath: &Path) -> bool {
    filepath
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pgm"))
}

impl FilePresenterPort for AutoFilePresenter {
    fn present(&self, raster: &GrayRaster, filepath: impl AsRef<Path>) -> Result<(), PresentError> {
        let filepath = filepath.as_ref();

        if is_pgm(filepath) {
            self.pgm.present(raster, filepath)
        } else {
            self.image.present(raster, filepath)
        }
    }
}
