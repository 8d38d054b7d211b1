use thiserror::Error;

use crate::core::actions::render_tiles::ports::pixel_kernel::PixelKernel;
use crate::core::data::complex::Complex;
use crate::core::data::render_config::RenderConfig;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum EscapeTimeKernelError {
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,
    #[error("escape radius must be positive and finite: {0}")]
    InvalidEscapeRadius(f64),
}

/// Mandelbrot escape-time kernel.
///
/// Iterates `z <- z² + c` from `z = 0`, testing `|z| > escape_radius` before
/// each step. A point that escapes at step `n` has intensity
/// `n / max_iter`; a point that never escapes is in the set, intensity 1.0.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EscapeTimeKernel {
    max_iter: u32,
    escape_radius: f64,
}

impl EscapeTimeKernel {
    pub fn new(max_iter: u32, escape_radius: f64) -> Result<Self, EscapeTimeKernelError> {
        if max_iter == 0 {
            return Err(EscapeTimeKernelError::ZeroMaxIterations);
        }

        if !(escape_radius.is_finite() && escape_radius > 0.0) {
            return Err(EscapeTimeKernelError::InvalidEscapeRadius(escape_radius));
        }

        Ok(Self {
            max_iter,
            escape_radius,
        })
    }

    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            max_iter: config.max_iter(),
            escape_radius: config.escape_radius(),
        }
    }

    #[must_use]
    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    /// Iteration at which `z` left the escape radius, or `None` for in-set points.
    #[must_use]
    pub fn escape_time(&self, c: Complex) -> Option<u32> {
        let mut z = Complex::ZERO;

        for n in 0..self.max_iter {
            if z.magnitude() > self.escape_radius {
                return Some(n);
            }
            z = z.square() + c;
        }

        None
    }
}

impl PixelKernel for EscapeTimeKernel {
    #[inline]
    fn intensity(&self, c: Complex) -> f32 {
        match self.escape_time(c) {
            Some(n) => n as f32 / self.max_iter as f32,
            None => 1.0,
        }
    }
}
