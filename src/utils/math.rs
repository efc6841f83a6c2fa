//! Small DSP math helpers

/// Power ratio in dB
#[inline]
pub fn power_to_db(ratio: f64) -> f64 {
    10.0 * ratio.log10()
}

/// Mean of `values`, zero when empty
#[inline]
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}
