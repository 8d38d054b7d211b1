use thiserror::Error;

use crate::core::data::gray_raster::GrayRasterError;
use crate::core::data::tile::TileIndex;
use crate::core::data::tile_buffer::TileBuffer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositeError {
    #[error("tile buffer side {actual} does not match tile size {expected}")]
    TileSizeMismatch { expected: u32, actual: u32 },
    #[error("tile {tile} does not fit the raster: {source}")]
    OutsideRaster {
        tile: TileIndex,
        source: GrayRasterError,
    },
}

/// Receives rendered tiles once their batch barrier has passed.
pub trait TileSink {
    fn composite(&mut self, tile: TileIndex, buffer: &TileBuffer) -> Result<(), CompositeError>;
}
