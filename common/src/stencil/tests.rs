use super::*;
use crate::structuring::StructuringElement;

fn ramp(width: usize, height: usize) -> Buffer2<f32> {
    let pixels = (0..width * height).map(|i| i as f32).collect();
    Buffer2::new(width, height, pixels)
}

// =============================================================================
// Kernel
// =============================================================================

#[test]
fn test_kernel_from_rows_is_centered() {
    let kernel = Kernel::<f32>::from_rows(3, 1, &[1.0, 2.0, 3.0]);
    assert_eq!(kernel.offsets(), &[(-1, 0), (0, 0), (1, 0)]);
    assert_eq!(kernel.weights(), &[1.0, 2.0, 3.0]);
}

#[test]
#[should_panic(expected = "kernel dimensions must be odd")]
fn test_kernel_rejects_even_size() {
    Kernel::<f32>::from_rows(2, 1, &[1.0, 1.0]);
}

// =============================================================================
// Correlation
// =============================================================================

#[test]
fn test_correlate_identity_kernel() {
    let input = ramp(6, 4);
    let kernel = Kernel::from_rows(3, 3, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    let mut output = Buffer2::new_default(6, 4);
    correlate(&input, &kernel, Extrapolation::Nearest, &mut output);
    assert_eq!(output, input);
}

#[test]
fn test_correlate_is_not_convolution() {
    // Weight on the right neighbor picks the right neighbor (no kernel flip).
    let input = ramp(5, 1);
    let kernel = Kernel::from_rows(3, 1, &[0.0, 0.0, 1.0]);
    let mut output = Buffer2::new_default(5, 1);
    correlate(&input, &kernel, Extrapolation::Nearest, &mut output);
    assert_eq!(output.pixels(), &[1.0, 2.0, 3.0, 4.0, 4.0]);
}

#[test]
fn test_correlate_constant_extrapolation() {
    let input = Buffer2::new_filled(3, 3, 1.0f32);
    let kernel = Kernel::from_rows(3, 3, &[1.0; 9]);
    let mut output = Buffer2::new_default(3, 3);
    correlate(&input, &kernel, Extrapolation::Constant(0.0), &mut output);
    assert_eq!(output[(1, 1)], 9.0);
    assert_eq!(output[(0, 1)], 6.0);
    assert_eq!(output[(0, 0)], 4.0);
}

#[test]
#[should_panic(expected = "width mismatch")]
fn test_correlate_panics_on_shape_mismatch() {
    let input = ramp(4, 4);
    let kernel = Kernel::from_rows(1, 1, &[1.0]);
    let mut output = Buffer2::new_default(3, 4);
    correlate(&input, &kernel, Extrapolation::Nearest, &mut output);
}

// =============================================================================
// Min / max / mean
// =============================================================================

#[test]
fn test_maximum_flags_is_or() {
    let mut input = Buffer2::new_filled(5, 5, false);
    input[(2, 2)] = true;
    let mut output = Buffer2::new_default(5, 5);
    maximum(
        &input,
        &StructuringElement::square(1),
        Extrapolation::Constant(false),
        &mut output,
    );
    for y in 0..5 {
        for x in 0..5 {
            let expected = (1..=3).contains(&x) && (1..=3).contains(&y);
            assert_eq!(output[(x, y)], expected, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_minimum_flags_is_and() {
    let mut input = Buffer2::new_filled(5, 5, true);
    input[(0, 0)] = false;
    let mut output = Buffer2::new_default(5, 5);
    minimum(
        &input,
        &StructuringElement::disk(1),
        Extrapolation::Constant(true),
        &mut output,
    );
    assert!(!output[(0, 0)]);
    assert!(!output[(1, 0)]);
    assert!(!output[(0, 1)]);
    assert!(output[(1, 1)]);
    assert_eq!(output.count_set(), 22);
}

#[test]
fn test_minimum_constant_false_erodes_border() {
    let input = Buffer2::new_filled(4, 4, true);
    let mut output = Buffer2::new_default(4, 4);
    minimum(
        &input,
        &StructuringElement::square(1),
        Extrapolation::Constant(false),
        &mut output,
    );
    assert_eq!(output.count_set(), 4);
}

#[test]
fn test_maximum_numeric_nearest() {
    let input = ramp(4, 3);
    let mut output = Buffer2::new_default(4, 3);
    maximum(
        &input,
        &StructuringElement::square(1),
        Extrapolation::Nearest,
        &mut output,
    );
    // Max of a ramp over a 3x3 window is its bottom-right sample, clamped at the edges.
    assert_eq!(output[(0, 0)], 5.0);
    assert_eq!(output[(3, 0)], 7.0);
    assert_eq!(output[(3, 2)], 11.0);
}

#[test]
fn test_mean_of_constant_is_constant() {
    let input = Buffer2::new_filled(7, 5, 2.5f32);
    let mut output = Buffer2::new_default(7, 5);
    mean(
        &input,
        &StructuringElement::square(2),
        Extrapolation::Nearest,
        &mut output,
    );
    assert!(output.iter().all(|&v| (v - 2.5).abs() < 1e-6));
}

#[test]
fn test_mean_radius_zero_is_identity() {
    let input = ramp(5, 5);
    let mut output = Buffer2::new_default(5, 5);
    mean(
        &input,
        &StructuringElement::square(0),
        Extrapolation::Nearest,
        &mut output,
    );
    assert_eq!(output, input);
}

#[test]
fn test_interior_and_border_paths_agree() {
    // A large image exercises the interior fast path; compare with a naive reference.
    let width = 40;
    let height = 31;
    let pixels = (0..width * height)
        .map(|i| ((i * 7919) % 97) as f32 - 48.0)
        .collect();
    let input = Buffer2::new(width, height, pixels);
    let element = StructuringElement::disk(3);
    let mut output = Buffer2::new_default(width, height);
    maximum(&input, &element, Extrapolation::Nearest, &mut output);

    for y in 0..height {
        for x in 0..width {
            let expected = element
                .offsets()
                .iter()
                .map(|&(dx, dy)| {
                    input.sample(x as isize + dx, y as isize + dy, Extrapolation::Nearest)
                })
                .fold(f32::NEG_INFINITY, f32::max);
            assert_eq!(output[(x, y)], expected, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_empty_raster_is_noop() {
    let input = Buffer2::<f32>::new_default(0, 0);
    let mut output = Buffer2::<f32>::new_default(0, 0);
    mean(
        &input,
        &StructuringElement::square(1),
        Extrapolation::Nearest,
        &mut output,
    );
    assert!(output.is_empty());
}
