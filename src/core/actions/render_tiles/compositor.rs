use crate::core::actions::render_tiles::ports::tile_sink::{CompositeError, TileSink};
use crate::core::data::gray_raster::GrayRaster;
use crate::core::data::tile::TileIndex;
use crate::core::data::tile_buffer::TileBuffer;

/// `round(clamp(v, 0, 1) * 255)`. NaN maps to black.
#[inline]
#[must_use]
pub fn intensity_to_gray(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Assembles rendered tiles into the final raster.
///
/// Each tile lands at `(ix * tile_px, iy * tile_px)`; nothing outside that
/// rectangle is written, so the result does not depend on the order tiles
/// arrive in.
#[derive(Debug)]
pub struct Compositor {
    raster: GrayRaster,
    tile_px: u32,
}

impl Compositor {
    #[must_use]
    pub fn new(width: u32, height: u32, tile_px: u32) -> Self {
        Self {
            raster: GrayRaster::new(width, height),
            tile_px,
        }
    }

    #[must_use]
    pub fn raster(&self) -> &GrayRaster {
        &self.raster
    }

    #[must_use]
    pub fn into_raster(self) -> GrayRaster {
        self.raster
    }
}

impl TileSink for Compositor {
    fn composite(&mut self, tile: TileIndex, buffer: &TileBuffer) -> Result<(), CompositeError> {
        let side = buffer.side();

        if side != self.tile_px {
            return Err(CompositeError::TileSizeMismatch {
                expected: self.tile_px,
                actual: side,
            });
        }

        if side == 0 {
            return Ok(());
        }

        let origin_x = tile.ix.saturating_mul(side);
        let origin_y = tile.iy.saturating_mul(side);

        // the last row fits only if the whole rectangle does
        self.raster
            .span_mut(origin_x, origin_y.saturating_add(side - 1), side)
            .map_err(|source| CompositeError::OutsideRaster { tile, source })?;

        for py in 0..side {
            let span = self
                .raster
                .span_mut(origin_x, origin_y + py, side)
                .map_err(|source| CompositeError::OutsideRaster { tile, source })?;

            for (dst, &value) in span.iter_mut().zip(buffer.row(py)) {
                *dst = intensity_to_gray(value);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_tile(side: u32, value: f32) -> TileBuffer {
        let mut buffer = TileBuffer::new(side);
        buffer.as_mut_slice().fill(value);
        buffer
    }

    #[test]
    fn test_intensity_to_gray_rounds_and_clamps() {
        assert_eq!(intensity_to_gray(0.0), 0);
        assert_eq!(intensity_to_gray(1.0), 255);
        assert_eq!(intensity_to_gray(0.5), 128);
        assert_eq!(intensity_to_gray(0.01), 3);
        assert_eq!(intensity_to_gray(0.99), 252);
        assert_eq!(intensity_to_gray(-0.5), 0);
        assert_eq!(intensity_to_gray(7.0), 255);
        assert_eq!(intensity_to_gray(f32::NAN), 0);
    }

    #[test]
    fn test_composite_writes_destination_rectangle_only() {
        let mut compositor = Compositor::new(4, 4, 2);

        compositor
            .composite(TileIndex::new(1, 0), &filled_tile(2, 1.0))
            .unwrap();

        let raster = compositor.into_raster();
        assert_eq!(raster.row(0), &[0, 0, 255, 255]);
        assert_eq!(raster.row(1), &[0, 0, 255, 255]);
        assert_eq!(raster.row(2), &[0, 0, 0, 0]);
        assert_eq!(raster.row(3), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_composite_keeps_row_major_layout_of_tile() {
        let mut compositor = Compositor::new(4, 4, 2);
        let mut buffer = TileBuffer::new(2);
        buffer.as_mut_slice().copy_from_slice(&[0.0, 1.0 / 255.0, 2.0 / 255.0, 3.0 / 255.0]);

        compositor.composite(TileIndex::new(0, 1), &buffer).unwrap();

        let raster = compositor.raster();
        assert_eq!(raster.pixel(0, 2), Some(0));
        assert_eq!(raster.pixel(1, 2), Some(1));
        assert_eq!(raster.pixel(0, 3), Some(2));
        assert_eq!(raster.pixel(1, 3), Some(3));
    }

    #[test]
    fn test_composite_order_does_not_matter() {
        let tiles = [
            (TileIndex::new(0, 0), 0.25),
            (TileIndex::new(1, 0), 0.5),
            (TileIndex::new(0, 1), 0.75),
            (TileIndex::new(1, 1), 1.0),
        ];
        let mut forward = Compositor::new(6, 6, 3);
        let mut backward = Compositor::new(6, 6, 3);

        for (tile, value) in tiles {
            forward.composite(tile, &filled_tile(3, value)).unwrap();
        }
        for (tile, value) in tiles.iter().rev() {
            backward.composite(*tile, &filled_tile(3, *value)).unwrap();
        }

        assert_eq!(forward.into_raster(), backward.into_raster());
    }

    #[test]
    fn test_composite_rejects_wrong_tile_size() {
        let mut compositor = Compositor::new(4, 4, 2);

        let result = compositor.composite(TileIndex::new(0, 0), &filled_tile(3, 1.0));

        assert_eq!(
            result,
            Err(CompositeError::TileSizeMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_composite_outside_raster_leaves_raster_untouched() {
        let mut compositor = Compositor::new(4, 3, 2);

        let result = compositor.composite(TileIndex::new(0, 1), &filled_tile(2, 1.0));

        assert!(matches!(result, Err(CompositeError::OutsideRaster { .. })));
        assert!(compositor.raster().as_bytes().iter().all(|&p| p == 0));
    }
}
