use common::Buffer2;
use strum_macros::{Display, EnumCount, EnumIter};

/// Pipeline stages in dependency order.
#[derive(Debug, Display, EnumIter, EnumCount, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Laplacian of the input image.
    Enhancement,
    /// Adaptive threshold of the enhanced image.
    Detection,
    /// Morphological growing of the detection mask.
    Growing,
}

impl Stage {
    /// The stage whose output this one consumes.
    pub fn predecessor(self) -> Option<Stage> {
        match self {
            Stage::Enhancement => None,
            Stage::Detection => Some(Stage::Enhancement),
            Stage::Growing => Some(Stage::Detection),
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Borrowed result of a stage.
#[derive(Debug, Clone, Copy)]
pub enum StageOutput<'a> {
    /// Floating-point image (enhancement).
    Image(&'a Buffer2<f32>),
    /// Boolean mask (detection, growing).
    Mask(&'a Buffer2<bool>),
}

impl<'a> StageOutput<'a> {
    pub fn as_image(self) -> Option<&'a Buffer2<f32>> {
        match self {
            StageOutput::Image(image) => Some(image),
            StageOutput::Mask(_) => None,
        }
    }

    pub fn as_mask(self) -> Option<&'a Buffer2<bool>> {
        match self {
            StageOutput::Mask(mask) => Some(mask),
            StageOutput::Image(_) => None,
        }
    }

    pub fn shape(self) -> (usize, usize) {
        match self {
            StageOutput::Image(image) => image.shape(),
            StageOutput::Mask(mask) => mask.shape(),
        }
    }
}
