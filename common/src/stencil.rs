//! Neighborhood operators over [`Buffer2`] rasters.
//!
//! Every operator writes one output sample per input sample, reading the input
//! through a list of offsets and an [`Extrapolation`] policy for samples that fall
//! outside the raster. Output rows are filled in parallel.

use num_traits::Float;

use crate::buffer2::Buffer2;
use crate::parallel::par_rows_mut;
use crate::structuring::StructuringElement;

/// Rule for synthesizing samples outside the raster bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extrapolation<T> {
    /// Out-of-bounds positions take the value of the closest in-bounds pixel.
    Nearest,
    /// Out-of-bounds positions take a fixed value.
    Constant(T),
}

/// Element types usable with ordering-based operators (min, max).
///
/// `LOWEST` and `HIGHEST` are the identities of max and min respectively.
/// For `bool`, max is OR and min is AND.
pub trait Sample: Copy + PartialOrd + Send + Sync + 'static {
    const LOWEST: Self;
    const HIGHEST: Self;
}

impl Sample for bool {
    const LOWEST: Self = false;
    const HIGHEST: Self = true;
}

macro_rules! impl_sample_float {
    ($($t:ty),*) => {
        $(impl Sample for $t {
            const LOWEST: Self = <$t>::NEG_INFINITY;
            const HIGHEST: Self = <$t>::INFINITY;
        })*
    };
}

macro_rules! impl_sample_int {
    ($($t:ty),*) => {
        $(impl Sample for $t {
            const LOWEST: Self = <$t>::MIN;
            const HIGHEST: Self = <$t>::MAX;
        })*
    };
}

impl_sample_float!(f32, f64);
impl_sample_int!(u8, u16, u32, i16, i32);

/// Weighted correlation kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel<T> {
    offsets: Vec<(isize, isize)>,
    weights: Vec<T>,
}

impl<T: Float> Kernel<T> {
    /// Build a centered kernel from row-major weights.
    ///
    /// Both dimensions must be odd so that the kernel has a center pixel.
    pub fn from_rows(width: usize, height: usize, weights: &[f64]) -> Self {
        assert_eq!(weights.len(), width * height, "kernel size mismatch");
        assert!(
            width % 2 == 1 && height % 2 == 1,
            "kernel dimensions must be odd, got {}x{}",
            width,
            height
        );

        let rx = (width / 2) as isize;
        let ry = (height / 2) as isize;
        let offsets = (-ry..=ry)
            .flat_map(|dy| (-rx..=rx).map(move |dx| (dx, dy)))
            .collect();
        let weights = weights
            .iter()
            .map(|&w| T::from(w).unwrap_or_else(T::nan))
            .collect();

        Self { offsets, weights }
    }

    #[inline]
    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }
}

/// Fold every neighborhood of `input` into the matching sample of `output`.
///
/// `fold(acc, k, sample)` is called once per offset, where `k` is the offset index.
pub fn fold_neighborhood<T, U, F>(
    input: &Buffer2<T>,
    offsets: &[(isize, isize)],
    extrapolation: Extrapolation<T>,
    output: &mut Buffer2<U>,
    init: U,
    fold: F,
) where
    T: Copy + Send + Sync,
    U: Copy + Send + Sync,
    F: Fn(U, usize, T) -> U + Send + Sync,
{
    assert_eq!(input.width(), output.width(), "width mismatch");
    assert_eq!(input.height(), output.height(), "height mismatch");

    let width = input.width();
    let height = input.height();
    let reach = offsets
        .iter()
        .map(|&(dx, dy)| dx.unsigned_abs().max(dy.unsigned_abs()))
        .max()
        .unwrap_or(0);
    let pixels = input.pixels();

    par_rows_mut(output.pixels_mut(), width, |y, row| {
        let row_interior = y >= reach && y + reach < height;

        for (x, out) in row.iter_mut().enumerate() {
            let interior = row_interior && x >= reach && x + reach < width;
            let mut acc = init;

            if interior {
                for (k, &(dx, dy)) in offsets.iter().enumerate() {
                    let sx = (x as isize + dx) as usize;
                    let sy = (y as isize + dy) as usize;
                    acc = fold(acc, k, pixels[sy * width + sx]);
                }
            } else {
                for (k, &(dx, dy)) in offsets.iter().enumerate() {
                    let sample = input.sample(x as isize + dx, y as isize + dy, extrapolation);
                    acc = fold(acc, k, sample);
                }
            }

            *out = acc;
        }
    });
}

/// Correlate `input` with `kernel`.
pub fn correlate<T>(
    input: &Buffer2<T>,
    kernel: &Kernel<T>,
    extrapolation: Extrapolation<T>,
    output: &mut Buffer2<T>,
) where
    T: Float + Send + Sync,
{
    let weights = kernel.weights();
    fold_neighborhood(
        input,
        kernel.offsets(),
        extrapolation,
        output,
        T::zero(),
        |acc, k, sample| acc + weights[k] * sample,
    );
}

/// Maximum over the element (OR for flags).
pub fn maximum<T: Sample>(
    input: &Buffer2<T>,
    element: &StructuringElement,
    extrapolation: Extrapolation<T>,
    output: &mut Buffer2<T>,
) {
    fold_neighborhood(
        input,
        element.offsets(),
        extrapolation,
        output,
        T::LOWEST,
        |acc, _, sample| if sample > acc { sample } else { acc },
    );
}

/// Minimum over the element (AND for flags).
pub fn minimum<T: Sample>(
    input: &Buffer2<T>,
    element: &StructuringElement,
    extrapolation: Extrapolation<T>,
    output: &mut Buffer2<T>,
) {
    fold_neighborhood(
        input,
        element.offsets(),
        extrapolation,
        output,
        T::HIGHEST,
        |acc, _, sample| if sample < acc { sample } else { acc },
    );
}

/// Arithmetic mean over the element.
pub fn mean<T>(
    input: &Buffer2<T>,
    element: &StructuringElement,
    extrapolation: Extrapolation<T>,
    output: &mut Buffer2<T>,
) where
    T: Float + Send + Sync,
{
    let norm = T::from(element.len())
        .map(|n| T::one() / n)
        .unwrap_or_else(T::zero);
    fold_neighborhood(
        input,
        element.offsets(),
        extrapolation,
        output,
        T::zero(),
        |acc, _, sample| acc + sample,
    );
    output.iter_mut().for_each(|v| *v = *v * norm);
}

#[cfg(test)]
mod tests;
