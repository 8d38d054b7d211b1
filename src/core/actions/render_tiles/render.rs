use std::time::Instant;

use tracing::info;

use crate::core::actions::cancellation::{CancelToken, NeverCancel};
use crate::core::actions::render_tiles::batch_scheduler::render_tiles_cancelable;
use crate::core::actions::render_tiles::compositor::Compositor;
use crate::core::actions::render_tiles::errors::RenderError;
use crate::core::actions::render_tiles::ports::accelerator::Accelerator;
use crate::core::actions::render_tiles::tile_pool::TilePool;
use crate::core::data::gray_raster::GrayRaster;
use crate::core::data::render_config::{RenderConfig, RenderSettings};
use crate::core::fractals::mandelbrot::algorithm::EscapeTimeKernel;
use crate::core::util::tile_grid::TileGrid;

/// Validates `settings` and renders them. Invalid settings fail with
/// [`RenderError::ConfigInvalid`] before anything is submitted.
pub fn render_settings<A: Accelerator>(
    settings: RenderSettings,
    accelerator: &A,
) -> Result<GrayRaster, RenderError> {
    let config = RenderConfig::new(settings)?;

    render_mandelbrot(&config, accelerator)
}

pub fn render_mandelbrot<A: Accelerator>(
    config: &RenderConfig,
    accelerator: &A,
) -> Result<GrayRaster, RenderError> {
    render_mandelbrot_cancelable(config, accelerator, &NeverCancel)
}

/// Renders the Mandelbrot set for `config` on `accelerator`.
///
/// Host memory for tiles is fixed up front at `min(max_inflight, tiles)`
/// buffers of `tile_px²` floats. On any error the partial raster is dropped.
#[tracing::instrument(
    skip_all,
    fields(
        width = config.width(),
        height = config.height(),
        backend = accelerator.name()
    )
)]
pub fn render_mandelbrot_cancelable<A, C>(
    config: &RenderConfig,
    accelerator: &A,
    cancel: &C,
) -> Result<GrayRaster, RenderError>
where
    A: Accelerator,
    C: CancelToken,
{
    let grid = TileGrid::from_config(config);
    let kernel = EscapeTimeKernel::from_config(config);
    let mut pool = TilePool::new(config.effective_inflight(), config.tile_px());
    let mut compositor = Compositor::new(config.width(), config.height(), config.tile_px());

    info!(
        tiles = grid.tile_count(),
        tile_px = config.tile_px(),
        batch_size = pool.capacity(),
        max_iter = config.max_iter(),
        "rendering mandelbrot"
    );

    let start = Instant::now();
    let summary = render_tiles_cancelable(&grid, &kernel, accelerator, &mut pool, &mut compositor, cancel)?;

    info!(
        tiles = summary.tiles,
        batches = summary.batches,
        elapsed = ?start.elapsed(),
        "render finished"
    );

    Ok(compositor.into_raster())
}
