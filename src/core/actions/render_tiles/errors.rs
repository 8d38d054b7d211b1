use thiserror::Error;

use crate::core::actions::cancellation::Cancelled;
use crate::core::actions::render_tiles::ports::accelerator::AcceleratorError;
use crate::core::actions::render_tiles::ports::tile_sink::CompositeError;
use crate::core::actions::render_tiles::tile_pool::TilePoolError;
use crate::core::data::render_config::ConfigError;
use crate::core::data::tile::{TileIndex, TileState};

/// Everything that can abort a render. None of these are retried.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid configuration: {0}")]
    ConfigInvalid(#[from] ConfigError),
    #[error("tile pool error: {0}")]
    Pool(#[from] TilePoolError),
    #[error("kernel failed: {0}")]
    KernelFailed(#[from] AcceleratorError),
    #[error("compositing failed: {0}")]
    Composite(#[from] CompositeError),
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("tile {tile} cannot move from {from} to {to}")]
    TileTransition {
        tile: TileIndex,
        from: TileState,
        to: TileState,
    },
}
