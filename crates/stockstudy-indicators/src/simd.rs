//! SIMD window helpers.
//!
//! Uses the `wide` crate for portable SIMD. The KDJ window extremes go through
//! here, and [`sma_resummed`] is the full re-summation counterpart of the
//! running-sum [`Sma`](crate::Sma), kept for cross-checking and benchmarks.

use wide::f64x4;

/// SIMD-optimized sum of a slice.
pub fn sum_simd(data: &[f64]) -> f64 {
    let chunks = data.len() / 4;
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let values = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        simd_sum += values;
    }

    let mut result = simd_sum.reduce_add();

    // Handle remaining elements
    for &value in &data[(chunks * 4)..] {
        result += value;
    }

    result
}

/// SIMD-optimized minimum. `None` for an empty slice.
pub fn min_simd(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }

    let chunks = data.len() / 4;
    let mut min_vec = f64x4::splat(f64::INFINITY);

    for i in 0..chunks {
        let idx = i * 4;
        let values = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        min_vec = min_vec.min(values);
    }

    let arr = min_vec.to_array();
    let mut min = arr[0].min(arr[1]).min(arr[2]).min(arr[3]);

    for &value in &data[(chunks * 4)..] {
        min = min.min(value);
    }

    Some(min)
}

/// SIMD-optimized maximum. `None` for an empty slice.
pub fn max_simd(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }

    let chunks = data.len() / 4;
    let mut max_vec = f64x4::splat(f64::NEG_INFINITY);

    for i in 0..chunks {
        let idx = i * 4;
        let values = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        max_vec = max_vec.max(values);
    }

    let arr = max_vec.to_array();
    let mut max = arr[0].max(arr[1]).max(arr[2]).max(arr[3]);

    for &value in &data[(chunks * 4)..] {
        max = max.max(value);
    }

    Some(max)
}

/// Trailing SMA that re-sums every window, aligned with `data`.
///
/// O(n * period); agrees with the running-sum SMA up to summation order.
pub fn sma_resummed(data: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; data.len()];
    }

    let period_f64 = period as f64;
    (0..data.len())
        .map(|i| {
            (i + 1 >= period).then(|| sum_simd(&data[i + 1 - period..=i]) / period_f64)
        })
        .collect()
}
