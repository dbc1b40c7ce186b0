//! Sample statistics used by the windowed spectral approximation

/// Mean of squared amplitudes
pub fn mean_square(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64
}

/// Sign changes between neighbours divided by the sample count.
/// Zero counts as positive.
pub fn zero_crossing_rate(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let crossings = samples
        .windows(2)
        .filter(|pair| (pair[0] >= 0.0) != (pair[1] >= 0.0))
        .count();
    crossings as f64 / samples.len() as f64
}

/// Mean of `(s[i] - s[i - lag])²` over `i` in `[lag, n)`.
///
/// Larger lags respond to slower movement, so a long lag stands in for
/// low-frequency content and a short lag for high-frequency content.
/// Returns 0 when the window does not fit.
pub fn lagged_difference_energy(samples: &[f64], lag: usize) -> f64 {
    let n = samples.len();
    if lag == 0 || n <= lag {
        return 0.0;
    }
    let sum: f64 = (lag..n)
        .map(|i| {
            let diff = samples[i] - samples[i - lag];
            diff * diff
        })
        .sum();
    sum / (n - lag) as f64
}

/// Pseudo-frequency centroid weighted by first-difference magnitude.
///
/// Index `i` maps to `i × rate / n`; a flat signal has no weight and
/// reports `rate / 4`.
pub fn difference_centroid(samples: &[f64], sample_rate: u32) -> f64 {
    let n = samples.len();
    let rate = sample_rate as f64;
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    for i in 1..n {
        let freq = i as f64 * rate / n as f64;
        let magnitude = (samples[i] - samples[i - 1]).abs();
        weighted += freq * magnitude;
        total_weight += magnitude;
    }

    if total_weight > 0.0 {
        weighted / total_weight
    } else {
        rate / 4.0
    }
}
