//! Row-parallel processing utilities for rasters.

use rayon::prelude::*;

/// Multiplier for number of chunks relative to CPU threads.
/// Using 2x threads provides good load balancing when some chunks finish faster.
const CHUNKS_PER_THREAD: usize = 2;

/// Compute rows per chunk for parallel image processing.
///
/// Splits the image height into roughly `num_threads * 2` chunks, minimum one row per chunk.
#[inline]
pub fn rows_per_chunk(height: usize) -> usize {
    let num_chunks = rayon::current_num_threads() * CHUNKS_PER_THREAD;
    (height / num_chunks).max(1)
}

/// Visit the rows of a row-major raster in parallel.
///
/// `f` receives the row index and the mutable row slice. Rows are disjoint, so
/// the result does not depend on scheduling as long as `f` only reads shared state.
pub fn par_rows_mut<T, F>(pixels: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if width == 0 || pixels.is_empty() {
        return;
    }
    debug_assert_eq!(pixels.len() % width, 0);

    let height = pixels.len() / width;
    let rows = rows_per_chunk(height);

    pixels
        .par_chunks_mut(rows * width)
        .enumerate()
        .for_each(|(chunk_idx, chunk)| {
            let first_row = chunk_idx * rows;
            for (i, row) in chunk.chunks_mut(width).enumerate() {
                f(first_row + i, row);
            }
        });
}
