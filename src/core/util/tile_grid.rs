use thiserror::Error;

use crate::core::data::argand_window::ArgandWindow;
use crate::core::data::complex::Complex;
use crate::core::data::render_config::RenderConfig;
use crate::core::data::tile::TileIndex;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum TileGridError {
    #[error("tile {tile} is outside the {grid_x}x{grid_y} tile grid")]
    TileOutsideGrid { tile: TileIndex, grid_x: u32, grid_y: u32 },
    #[error("pixel (x: {px}, y: {py}) is outside a {tile_px}px tile")]
    PixelOutsideTile { px: u32, py: u32, tile_px: u32 },
}

/// Geometry of a render: which raster pixels a tile covers, and which point
/// of the Argand window every raster pixel samples.
///
/// All complex coordinates are derived from *global* pixel indices, so the
/// same raster pixel maps to the same point whatever tile size produced it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TileGrid {
    grid_tiles_x: u32,
    grid_tiles_y: u32,
    tile_px: u32,
    window: ArgandWindow,
}

impl TileGrid {
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            grid_tiles_x: config.grid_tiles_x(),
            grid_tiles_y: config.grid_tiles_y(),
            tile_px: config.tile_px(),
            window: config.window(),
        }
    }

    #[must_use]
    pub fn tile_px(&self) -> u32 {
        self.tile_px
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.grid_tiles_x * self.tile_px
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.grid_tiles_y * self.tile_px
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.grid_tiles_x as usize * self.grid_tiles_y as usize
    }

    #[must_use]
    pub fn contains(&self, tile: TileIndex) -> bool {
        tile.ix < self.grid_tiles_x && tile.iy < self.grid_tiles_y
    }

    /// Every tile of the grid, row-major: ascending `iy`, then ascending `ix`.
    #[must_use]
    pub fn pending_tiles(&self) -> Vec<TileIndex> {
        (0..self.grid_tiles_y)
            .flat_map(|iy| (0..self.grid_tiles_x).map(move |ix| TileIndex { ix, iy }))
            .collect()
    }

    /// Raster position of the tile's top-left pixel.
    #[must_use]
    pub fn tile_origin(&self, tile: TileIndex) -> (u32, u32) {
        (tile.ix * self.tile_px, tile.iy * self.tile_px)
    }

    #[must_use]
    pub fn raster_position(&self, tile: TileIndex, px: u32, py: u32) -> (u32, u32) {
        let (origin_x, origin_y) = self.tile_origin(tile);
        (origin_x + px, origin_y + py)
    }

    /// Distance in the complex plane between horizontally and vertically
    /// adjacent pixels.
    #[must_use]
    pub fn pixel_step(&self) -> (f64, f64) {
        (
            self.window.width() / self.width() as f64,
            self.window.height() / self.height() as f64,
        )
    }

    #[must_use]
    pub fn raster_to_complex(&self, x: u32, y: u32) -> Complex {
        let re = self.window.x0() + self.window.width() * x as f64 / self.width() as f64;
        let im = self.window.y0() + self.window.height() * y as f64 / self.height() as f64;

        Complex { re, im }
    }

    /// Hot-path mapping used inside kernel launches; the launch extent
    /// already guarantees `px, py < tile_px`.
    #[inline]
    #[must_use]
    pub fn pixel_to_complex(&self, tile: TileIndex, px: u32, py: u32) -> Complex {
        let (x, y) = self.raster_position(tile, px, py);
        self.raster_to_complex(x, y)
    }

    pub fn checked_pixel_to_complex(
        &self,
        tile: TileIndex,
        px: u32,
        py: u32,
    ) -> Result<Complex, TileGridError> {
        if !self.contains(tile) {
            return Err(TileGridError::TileOutsideGrid {
                tile,
                grid_x: self.grid_tiles_x,
                grid_y: self.grid_tiles_y,
            });
        }

        if px >= self.tile_px || py >= self.tile_px {
            return Err(TileGridError::PixelOutsideTile {
                px,
                py,
                tile_px: self.tile_px,
            });
        }

        Ok(self.pixel_to_complex(tile, px, py))
    }
}
