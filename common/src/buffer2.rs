use std::ops::{Deref, DerefMut, Index, IndexMut};

use crate::stencil::Extrapolation;

/// Dense row-major 2D buffer.
///
/// Used both for images (`Buffer2<f32>`) and for flag masks (`Buffer2<bool>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer2<T> {
    pixels: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Buffer2<T> {
    pub fn new(width: usize, height: usize, pixels: Vec<T>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixels length must equal width * height"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Whether the signed position lies inside the buffer.
    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    #[inline]
    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [T] {
        &mut self.pixels
    }
}

impl<T: Copy> Buffer2<T> {
    /// Read a sample at a signed position, synthesizing out-of-bounds values
    /// according to `extrapolation`.
    ///
    /// The buffer must not be empty when extrapolating with [`Extrapolation::Nearest`].
    #[inline]
    pub fn sample(&self, x: isize, y: isize, extrapolation: Extrapolation<T>) -> T {
        if self.contains(x, y) {
            return self.pixels[y as usize * self.width + x as usize];
        }
        match extrapolation {
            Extrapolation::Nearest => {
                let cx = x.clamp(0, self.width as isize - 1) as usize;
                let cy = y.clamp(0, self.height as isize - 1) as usize;
                self.pixels[cy * self.width + cx]
            }
            Extrapolation::Constant(value) => value,
        }
    }

    /// Fill `self` with `f` applied to every sample of `other`.
    pub fn generate_from<U: Copy, F: Fn(U) -> T>(&mut self, other: &Buffer2<U>, f: F) {
        assert_eq!(self.width, other.width, "width mismatch");
        assert_eq!(self.height, other.height, "height mismatch");
        self.pixels
            .iter_mut()
            .zip(other.pixels.iter())
            .for_each(|(dst, &src)| *dst = f(src));
    }
}

impl<T: Default + Clone> Buffer2<T> {
    pub fn new_default(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![T::default(); width * height],
            width,
            height,
        }
    }
}

impl<T: Clone> Buffer2<T> {
    pub fn new_filled(width: usize, height: usize, value: T) -> Self {
        Self {
            pixels: vec![value; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn fill(&mut self, value: T) {
        self.pixels.fill(value);
    }
}

impl Buffer2<bool> {
    /// Number of set flags.
    pub fn count_set(&self) -> usize {
        self.pixels.iter().filter(|&&flag| flag).count()
    }
}

impl<T> Index<(usize, usize)> for Buffer2<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.pixels[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Buffer2<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        &mut self.pixels[y * self.width + x]
    }
}

impl<T> Deref for Buffer2<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.pixels
    }
}

impl<T> DerefMut for Buffer2<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.pixels
    }
}
