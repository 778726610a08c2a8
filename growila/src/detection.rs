//! Adaptive threshold on the enhanced image.
//!
//! Enhanced values are modeled as Laplace-distributed around zero with scale `b`,
//! estimated by the mean absolute value. A pixel is flagged when its value exceeds
//! `tau = -b * ln(2 * pfa)`, the level at which `P(e > tau) = exp(-tau / b) / 2` equals
//! the probability of false alarm.

use common::parallel::par_rows_mut;
use common::Buffer2;

/// Compute the detection threshold for an enhanced image.
///
/// The L1 norm is accumulated in `f64`. An empty image yields a zero threshold.
pub fn detection_threshold(enhanced: &Buffer2<f32>, pfa: f64) -> f32 {
    let count = enhanced.len();
    if count == 0 {
        return 0.0;
    }

    let l1: f64 = enhanced.iter().map(|&v| (v as f64).abs()).sum();
    let scale = l1 / count as f64;
    let threshold = -scale * (2.0 * pfa).ln();

    tracing::trace!(scale, threshold, "Laplace noise model");
    threshold as f32
}

/// Flag every pixel strictly above `threshold`. NaN never passes.
pub fn threshold_mask(enhanced: &Buffer2<f32>, threshold: f32, output: &mut Buffer2<bool>) {
    assert_eq!(enhanced.width(), output.width(), "width mismatch");
    assert_eq!(enhanced.height(), output.height(), "height mismatch");

    let width = enhanced.width();
    par_rows_mut(output.pixels_mut(), width, |y, row| {
        for (flag, &value) in row.iter_mut().zip(enhanced.row(y)) {
            *flag = value > threshold;
        }
    });
}
