//! Linear and morphological filters used by the detection pipeline.
//!
//! All operators read one raster and overwrite a caller-provided output of the
//! same shape; inputs are never modified. Dense operators run through
//! [`common::stencil`], while [`dilate_sparse`] only visits set pixels.


use std::sync::LazyLock;

use common::stencil::{self, Extrapolation, Kernel, Sample};
use common::{Buffer2, StructuringElement};
use num_traits::Float;

/// Isotropic 3x3 Laplacian, row-major.
///
/// ```text
/// -1/6  -2/3  -1/6
/// -2/3  10/3  -2/3
/// -1/6  -2/3  -1/6
/// ```
///
/// The weights sum to zero, so flat regions map to zero and bright impulses
/// produce a strong positive response.
pub const LAPLACIAN_WEIGHTS: [f64; 9] = [
    -1.0 / 6.0,
    -2.0 / 3.0,
    -1.0 / 6.0,
    -2.0 / 3.0,
    10.0 / 3.0,
    -2.0 / 3.0,
    -1.0 / 6.0,
    -2.0 / 3.0,
    -1.0 / 6.0,
];

static LAPLACIAN: LazyLock<Kernel<f32>> =
    LazyLock::new(|| Kernel::from_rows(3, 3, &LAPLACIAN_WEIGHTS));

/// The [`LAPLACIAN_WEIGHTS`] kernel, built on first use and shared afterwards.
pub fn laplacian_kernel() -> &'static Kernel<f32> {
    &LAPLACIAN
}

/// Compute the isotropic Laplacian of an image with nearest-value extrapolation.
pub fn laplacian(input: &Buffer2<f32>, output: &mut Buffer2<f32>) {
    stencil::correlate(input, laplacian_kernel(), Extrapolation::Nearest, output);
}

/// Box blur of side `2 * radius + 1` with nearest-value extrapolation.
pub fn blur<T>(input: &Buffer2<T>, radius: usize, output: &mut Buffer2<T>)
where
    T: Float + Send + Sync,
{
    stencil::mean(
        input,
        &StructuringElement::square(radius),
        Extrapolation::Nearest,
        output,
    );
}

/// Dilate by a box of the given radius with nearest-value extrapolation.
pub fn dilate<T: Sample>(input: &Buffer2<T>, radius: usize, output: &mut Buffer2<T>) {
    dilate_with(
        input,
        &StructuringElement::square(radius),
        Extrapolation::Nearest,
        output,
    );
}

/// Erode by a box of the given radius with nearest-value extrapolation.
pub fn erode<T: Sample>(input: &Buffer2<T>, radius: usize, output: &mut Buffer2<T>) {
    erode_with(
        input,
        &StructuringElement::square(radius),
        Extrapolation::Nearest,
        output,
    );
}

/// Dilate with an explicit structuring element and boundary policy.
#[inline]
pub fn dilate_with<T: Sample>(
    input: &Buffer2<T>,
    element: &StructuringElement,
    extrapolation: Extrapolation<T>,
    output: &mut Buffer2<T>,
) {
    stencil::maximum(input, element, extrapolation, output);
}

/// Erode with an explicit structuring element and boundary policy.
#[inline]
pub fn erode_with<T: Sample>(
    input: &Buffer2<T>,
    element: &StructuringElement,
    extrapolation: Extrapolation<T>,
    output: &mut Buffer2<T>,
) {
    stencil::minimum(input, element, extrapolation, output);
}

/// Dilate a sparse mask by a ball of the given radius.
///
/// Only set pixels at least one pixel away from the image border are visited; each
/// one stamps the ball into `output`. Ball cells falling outside the image are
/// skipped. The routine only sets flags, so `output` must start cleared.
pub fn dilate_sparse(input: &Buffer2<bool>, radius: usize, output: &mut Buffer2<bool>) {
    assert_eq!(input.width(), output.width(), "width mismatch");
    assert_eq!(input.height(), output.height(), "height mismatch");
    debug_assert!(
        output.iter().all(|&flag| !flag),
        "dilate_sparse output must start cleared"
    );

    let width = input.width();
    let height = input.height();
    if width < 3 || height < 3 {
        return;
    }

    let ball = StructuringElement::disk(element_radius(input, radius));

    for y in 1..height - 1 {
        let row = &input.row(y)[1..width - 1];
        for x in row
            .iter()
            .enumerate()
            .filter_map(|(i, &flag)| flag.then_some(i + 1))
        {
            for &(dx, dy) in ball.offsets() {
                let tx = x as isize + dx;
                let ty = y as isize + dy;
                if output.contains(tx, ty) {
                    output[(tx as usize, ty as usize)] = true;
                }
            }
        }
    }
}

/// Grow a detection mask.
///
/// For `radius > 1`, dilates by a ball of `radius` and erodes the result by a ball of
/// `radius - 1`: regions expand by about one pixel and gaps narrower than the dilation
/// are closed. For `radius <= 1`, the mask is dilated by the radius-1 ball through
/// [`dilate_sparse`].
///
/// Dilation pads with `false`, but erosion pads with `true` rather than `false`.
/// With `false` padding, the erosion would eat `radius - 1` pixels of every flagged
/// region touching the frame, so hits on the edge would shrink or vanish instead of
/// growing. Padding each operator with its neutral value keeps the frame edge from
/// creating or removing flags.
pub fn grow(input: &Buffer2<bool>, radius: usize, output: &mut Buffer2<bool>) {
    if radius > 1 {
        let mut dilated = Buffer2::new_default(input.width(), input.height());
        grow_dense(input, radius, &mut dilated, output);
    } else {
        grow_sparse(input, output);
    }
}

/// [`grow`] with a caller-owned scratch buffer, so repeated calls do not allocate.
///
/// `scratch` must have the shape of `input` when `radius > 1`; it is unused otherwise.
pub fn grow_with_scratch(
    input: &Buffer2<bool>,
    radius: usize,
    scratch: &mut Buffer2<bool>,
    output: &mut Buffer2<bool>,
) {
    if radius > 1 {
        grow_dense(input, radius, scratch, output);
    } else {
        grow_sparse(input, output);
    }
}

fn grow_dense(
    input: &Buffer2<bool>,
    radius: usize,
    dilated: &mut Buffer2<bool>,
    output: &mut Buffer2<bool>,
) {
    debug_assert!(radius > 1);
    dilate_with(
        input,
        &StructuringElement::disk(element_radius(input, radius)),
        Extrapolation::Constant(false),
        dilated,
    );
    erode_with(
        dilated,
        &StructuringElement::disk(element_radius(input, radius - 1)),
        Extrapolation::Constant(true),
        output,
    );
}

/// Ball radius actually needed on `image`.
///
/// No two pixels of the image are farther apart than `width + height`, and the
/// padding constants used with balls are the operators' neutral values, so larger
/// offsets never change a result. Capping keeps the element size bounded by the image.
fn element_radius<T>(image: &Buffer2<T>, radius: usize) -> usize {
    radius.min(image.width() + image.height())
}

fn grow_sparse(input: &Buffer2<bool>, output: &mut Buffer2<bool>) {
    output.fill(false);
    dilate_sparse(input, 1, output);
}
