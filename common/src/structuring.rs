//! Structuring elements for neighborhood operators.
//!
//! An element is a fixed list of `(dx, dy)` offsets relative to the origin,
//! enumerated row by row from the top-left.

/// Shape of a structuring element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Chebyshev ball: the full `(2r + 1) x (2r + 1)` square.
    Box,
    /// Euclidean disk: offsets with `dx² + dy² <= r²`.
    /// Radius 1 is the center and its four orthogonal neighbors.
    Ball,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    offsets: Vec<(isize, isize)>,
}

impl StructuringElement {
    pub fn new(kind: ElementKind, radius: usize) -> Self {
        let r = radius as isize;
        let r_sq = r * r;
        let offsets = (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| match kind {
                ElementKind::Box => true,
                ElementKind::Ball => dx * dx + dy * dy <= r_sq,
            })
            .collect();

        Self { offsets }
    }

    #[inline]
    pub fn square(radius: usize) -> Self {
        Self::new(ElementKind::Box, radius)
    }

    #[inline]
    pub fn disk(radius: usize) -> Self {
        Self::new(ElementKind::Ball, radius)
    }

    #[inline]
    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
