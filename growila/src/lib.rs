//! GrowiLa - cosmic-ray detection in single-channel images.
//!
//! Detection runs in three memoized stages:
//! - Enhancement: isotropic Laplacian of the input
//! - Detection: adaptive threshold derived from a probability of false alarm
//! - Growing: morphological growing of the detection mask
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use growila::{Buffer2, Config, Pipeline};
//!
//! let image = Buffer2::new(width, height, pixels);
//! let mut pipeline = Pipeline::new(image, Config::new(0.01, 1))?;
//!
//! println!("Flagged {} pixels", pipeline.mask().count_set());
//! ```

pub mod config;
pub mod detection;
mod error;
pub mod morphology;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testing;

pub use common::Buffer2;
pub use config::{Config, DEFAULT_PFA};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, Stage, StageOutput};
