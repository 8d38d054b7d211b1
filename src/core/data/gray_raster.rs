use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrayRasterError {
    #[error("span of {len} pixels at x:{x}, y:{y} is outside of {width}x{height} raster")]
    SpanOutsideBounds {
        x: u32,
        y: u32,
        len: u32,
        width: u32,
        height: u32,
    },
    #[error("raster size {expected} does not match buffer size {actual}")]
    BoundsMismatch { expected: usize, actual: usize },
}

pub type GrayRasterData = Vec<u8>;

/// Final 8-bit single-channel image, row-major with the origin at the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayRaster {
    width: u32,
    height: u32,
    data: GrayRasterData,
}

impl GrayRaster {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn from_data(width: u32, height: u32, data: GrayRasterData) -> Result<Self, GrayRasterError> {
        let expected = width as usize * height as usize;

        if expected != data.len() {
            return Err(GrayRasterError::BoundsMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.data[self.index(x, y)])
    }

    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Mutable run of `len` pixels starting at `(x, y)`, confined to one row.
    pub fn span_mut(&mut self, x: u32, y: u32, len: u32) -> Result<&mut [u8], GrayRasterError> {
        let fits = y < self.height && (x as u64 + len as u64) <= self.width as u64;

        if !fits {
            return Err(GrayRasterError::SpanOutsideBounds {
                x,
                y,
                len,
                width: self.width,
                height: self.height,
            });
        }

        let start = self.index(x, y);
        Ok(&mut self.data[start..start + len as usize])
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_bytes(self) -> GrayRasterData {
        self.data
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_raster_is_black() {
        let raster = GrayRaster::new(4, 3);

        assert_eq!(raster.width(), 4);
        assert_eq!(raster.height(), 3);
        assert_eq!(raster.as_bytes().len(), 12);
        assert!(raster.as_bytes().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_from_data_rejects_wrong_length() {
        let result = GrayRaster::from_data(2, 2, vec![0; 3]);

        assert_eq!(
            result,
            Err(GrayRasterError::BoundsMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_pixel_is_row_major() {
        let raster = GrayRaster::from_data(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();

        assert_eq!(raster.pixel(0, 0), Some(0));
        assert_eq!(raster.pixel(2, 0), Some(2));
        assert_eq!(raster.pixel(0, 1), Some(3));
        assert_eq!(raster.pixel(3, 0), None);
        assert_eq!(raster.pixel(0, 2), None);
        assert_eq!(raster.row(1), &[3, 4, 5]);
    }

    #[test]
    fn test_span_mut_writes_only_its_pixels() {
        let mut raster = GrayRaster::new(4, 2);

        raster.span_mut(1, 1, 2).unwrap().fill(9);

        assert_eq!(raster.as_bytes(), &[0, 0, 0, 0, 0, 9, 9, 0]);
    }

    #[test]
    fn test_span_mut_rejects_spans_leaving_the_row() {
        let mut raster = GrayRaster::new(4, 2);

        assert!(raster.span_mut(3, 0, 2).is_err());
        assert!(raster.span_mut(0, 2, 1).is_err());
        assert!(raster.span_mut(0, 1, 4).is_ok());
    }
}
