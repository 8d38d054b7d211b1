//! Tiled, batch-scheduled Mandelbrot renderer.
//!
//! The image is split into a grid of square tiles. Tiles are rendered in
//! row-major batches no larger than a fixed pool of host buffers, each batch
//! is launched on an [`Accelerator`] and composited into an 8-bit
//! [`GrayRaster`] once the accelerator reports it complete.

pub mod adapters;
pub mod controllers;
pub mod core;
pub mod presenters;

pub use crate::adapters::accelerator::rayon_accelerator::RayonAccelerator;
pub use crate::adapters::accelerator::serial_accelerator::SerialAccelerator;
pub use crate::controllers::cli::render_controller::RenderController;
pub use crate::controllers::ports::file_presenter::{FilePresenterPort, PresentError};
pub use crate::core::actions::cancellation::{CancelFlag, CancelToken, Cancelled, NeverCancel};
pub use crate::core::actions::render_tiles::batch_scheduler::{RenderSummary, render_tiles, render_tiles_cancelable};
pub use crate::core::actions::render_tiles::errors::RenderError;
pub use crate::core::actions::render_tiles::ports::accelerator::{Accelerator, AcceleratorError, LaunchQueue};
pub use crate::core::actions::render_tiles::render::{
    render_mandelbrot, render_mandelbrot_cancelable, render_settings,
};
pub use crate::core::data::gray_raster::GrayRaster;
pub use crate::core::data::render_config::{ConfigError, RenderConfig, RenderSettings};
pub use crate::presenters::file::auto::AutoFilePresenter;
pub use crate::presenters::file::image_file::ImageFilePresenter;
pub use crate::presenters::file::pgm::PgmFilePresenter;
