/// Arithmetic mean of `samples`, or `None` when there are none.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population standard deviation of `samples`, or `None` when there are none.
pub fn std_dev(samples: &[f64]) -> Option<f64> {
    let avg = mean(samples)?;
    let variance = samples
        .iter()
        .map(|s| {
            let diff = avg - s;
            diff * diff
        })
        .sum::<f64>()
        / samples.len() as f64;
    Some(variance.sqrt())
}

/// Smallest sample, ignoring NaN.
pub fn fastest(samples: &[f64]) -> Option<f64> {
    samples
        .iter()
        .copied()
        .filter(|s| !s.is_nan())
        .min_by(|a, b| a.total_cmp(b))
}

/// Seconds to whole milliseconds for display.
pub fn as_millis(secs: f64) -> f64 {
    (secs * 1000.0).round()
}
