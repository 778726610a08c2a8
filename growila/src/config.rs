//! Detection parameters.

use crate::error::{Error, Result};

/// Default probability of false alarm.
pub const DEFAULT_PFA: f64 = 0.01;

/// Parameters fixed for the lifetime of a [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Per-pixel probability of false alarm, in the open interval (0, 1).
    /// Smaller values raise the threshold and yield fewer detections.
    pub pfa: f64,
    /// Growing radius in pixels. 0 disables growing.
    pub radius: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pfa: DEFAULT_PFA,
            radius: 0,
        }
    }
}

impl Config {
    pub fn new(pfa: f64, radius: usize) -> Self {
        Self { pfa, radius }
    }

    /// Check the parameters. NaN is rejected along with out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if !(self.pfa > 0.0 && self.pfa < 1.0) {
            return Err(Error::InvalidPfa(self.pfa));
        }
        Ok(())
    }
}
