use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ArgandWindowError {
    #[error("argand window bounds must be finite: x [{x0}, {x1}], y [{y0}, {y1}]")]
    NonFinite { x0: f64, x1: f64, y0: f64, y1: f64 },
    #[error("argand window size must be positive: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

/// Axis-aligned rectangle of the complex plane sampled by the raster.
///
/// `x` runs along the real axis and `y` along the imaginary axis. The
/// raster's top row samples `y0`, so `y` grows downwards in image space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArgandWindow {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

impl ArgandWindow {
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Result<Self, ArgandWindowError> {
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) {
            return Err(ArgandWindowError::NonFinite { x0, x1, y0, y1 });
        }

        let width = x1 - x0;
        let height = y1 - y0;

        if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
            return Err(ArgandWindowError::InvalidSize { width, height });
        }

        Ok(Self { x0, x1, y0, y1 })
    }

    #[must_use]
    pub fn x0(&self) -> f64 {
        self.x0
    }

    #[must_use]
    pub fn x1(&self) -> f64 {
        self.x1
    }

    #[must_use]
    pub fn y0(&self) -> f64 {
        self.y0
    }

    #[must_use]
    pub fn y1(&self) -> f64 {
        self.y1
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

impl Default for ArgandWindow {
    fn default() -> Self {
        Self {
            x0: -2.0,
            x1: 1.0,
            y0: -1.0,
            y1: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argand_window_new_valid() {
        let window = ArgandWindow::new(-2.0, 1.0, -1.0, 1.0).unwrap();

        assert_eq!(window.x0(), -2.0);
        assert_eq!(window.x1(), 1.0);
        assert_eq!(window.y0(), -1.0);
        assert_eq!(window.y1(), 1.0);
        assert_eq!(window.width(), 3.0);
        assert_eq!(window.height(), 2.0);
    }

    #[test]
    fn test_default_is_classic_view() {
        assert_eq!(
            ArgandWindow::default(),
            ArgandWindow::new(-2.0, 1.0, -1.0, 1.0).unwrap()
        );
    }

    #[test]
    fn test_argand_window_dimensions_must_be_positive() {
        assert_eq!(
            ArgandWindow::new(0.0, 0.0, 0.0, 1.0),
            Err(ArgandWindowError::InvalidSize {
                width: 0.0,
                height: 1.0
            })
        );
        assert_eq!(
            ArgandWindow::new(1.0, -1.0, 0.0, 1.0),
            Err(ArgandWindowError::InvalidSize {
                width: -2.0,
                height: 1.0
            })
        );
        assert_eq!(
            ArgandWindow::new(0.0, 1.0, 2.0, -2.0),
            Err(ArgandWindowError::InvalidSize {
                width: 1.0,
                height: -4.0
            })
        );
    }

    #[test]
    fn test_argand_window_rejects_non_finite_bounds() {
        assert!(matches!(
            ArgandWindow::new(f64::NAN, 1.0, -1.0, 1.0),
            Err(ArgandWindowError::NonFinite { .. })
        ));
        assert!(matches!(
            ArgandWindow::new(-1.0, 1.0, -1.0, f64::INFINITY),
            Err(ArgandWindowError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_argand_window_rejects_overflowing_span() {
        assert!(matches!(
            ArgandWindow::new(-f64::MAX, f64::MAX, -1.0, 1.0),
            Err(ArgandWindowError::InvalidSize { .. })
        ));
    }
}
