//! SIMD window statistics.
//!
//! These use the `wide` crate for portable SIMD operations. Windows here are
//! short (20 to 50 values), so lanes are summed in chunks of four with a
//! scalar tail.

use wide::f64x4;

/// Sum of deviations from `origin`.
pub fn sum_dev(data: &[f64], origin: f64) -> f64 {
    let chunks = data.chunks_exact(4);
    let tail: f64 = chunks.remainder().iter().map(|x| x - origin).sum();

    let origin_vec = f64x4::splat(origin);
    let mut acc = f64x4::splat(0.0);
    for chunk in chunks {
        acc += f64x4::new([chunk[0], chunk[1], chunk[2], chunk[3]]) - origin_vec;
    }

    acc.reduce_add() + tail
}

/// Arithmetic mean of a slice, `None` when empty.
///
/// Accumulated as offsets from the first value, so a slice of identical
/// values averages to exactly that value.
pub fn mean(data: &[f64]) -> Option<f64> {
    let &first = data.first()?;
    Some(first + sum_dev(data, first) / data.len() as f64)
}

/// Sum of squared deviations from `mean`.
pub fn sum_sq_dev(data: &[f64], mean: f64) -> f64 {
    let chunks = data.chunks_exact(4);
    let tail: f64 = chunks
        .remainder()
        .iter()
        .map(|x| (x - mean) * (x - mean))
        .sum();

    let mean_vec = f64x4::splat(mean);
    let mut acc = f64x4::splat(0.0);
    for chunk in chunks {
        let diff = f64x4::new([chunk[0], chunk[1], chunk[2], chunk[3]]) - mean_vec;
        acc += diff * diff;
    }

    acc.reduce_add() + tail
}

/// Population standard deviation (divides by N).
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    let mean = mean(data)?;
    Some((sum_sq_dev(data, mean) / data.len() as f64).sqrt())
}
