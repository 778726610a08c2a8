//! Raster primitives shared by the workspace crates: dense 2D buffers,
//! structuring elements, neighborhood operators and logging setup.

pub mod buffer2;
pub mod log_setup;
pub mod parallel;
pub mod stencil;
pub mod structuring;

pub use buffer2::Buffer2;
pub use stencil::{Extrapolation, Kernel, Sample};
pub use structuring::{ElementKind, StructuringElement};
