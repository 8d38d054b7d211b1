use crate::core::data::complex::Complex;

/// Per-pixel function evaluated inside kernel launches.
///
/// Must be pure: the same point always yields the same intensity, and an
/// implementation never touches shared mutable state.
pub trait PixelKernel: Sync {
    fn intensity(&self, c: Complex) -> f32;
}

impl<F> PixelKernel for F
where
    F: Fn(Complex) -> f32 + Sync,
{
    #[inline]
    fn intensity(&self, c: Complex) -> f32 {
        self(c)
    }
}
