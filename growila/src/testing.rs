//! Test fixtures: tracing setup and synthetic frames.

#![allow(dead_code)]

use common::Buffer2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Initialize tracing subscriber for tests.
/// Safe to call multiple times - will only initialize once.
/// Respects RUST_LOG env var, defaults to "info".
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Flat frame at `level` with uniform noise in `[-noise, noise)`.
pub fn noisy_flat(width: usize, height: usize, level: f32, noise: f32, seed: u64) -> Buffer2<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pixels = (0..width * height)
        .map(|_| {
            if noise > 0.0 {
                level + rng.random_range(-noise..noise)
            } else {
                level
            }
        })
        .collect();
    Buffer2::new(width, height, pixels)
}

/// Lattice of hit positions `spacing` apart, keeping `margin` pixels from every edge.
pub fn hit_lattice(width: usize, height: usize, spacing: usize, margin: usize) -> Vec<(usize, usize)> {
    let mut positions = Vec::new();
    let mut y = margin;
    while y + margin < height {
        let mut x = margin;
        while x + margin < width {
            positions.push((x, y));
            x += spacing;
        }
        y += spacing;
    }
    positions
}

/// Add single-pixel cosmic ray hits at the given positions.
pub fn add_cosmic_rays(image: &mut Buffer2<f32>, positions: &[(usize, usize)], amplitude: f32) {
    for &(x, y) in positions {
        image[(x, y)] += amplitude;
    }
}

/// Random mask with every pixel closer than `margin` to the border cleared.
pub fn random_interior_mask(
    width: usize,
    height: usize,
    margin: usize,
    density: f64,
    seed: u64,
) -> Buffer2<bool> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut mask = Buffer2::new_filled(width, height, false);
    for y in margin..height.saturating_sub(margin) {
        for x in margin..width.saturating_sub(margin) {
            mask[(x, y)] = rng.random_bool(density);
        }
    }
    mask
}
