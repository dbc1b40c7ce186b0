//! Windowed-difference spectral approximation
//!
//! No transform is involved: band energies are first-difference energies at
//! fixed lags and the centroid is an index-weighted average. The numbers are
//! coarse hints for classification, not calibrated measurements.

pub mod stats;

use crate::record::SpectralFeatures;
use stats::{difference_centroid, lagged_difference_energy, mean_square, zero_crossing_rate};

/// Lag standing in for the low band
pub const LOW_BAND_LAG: usize = 100;
/// Lag standing in for the mid band
pub const MID_BAND_LAG: usize = 20;
/// Lag standing in for the high band
pub const HIGH_BAND_LAG: usize = 5;

/// Compute all six features over a mono window
pub fn compute_spectral_features(samples: &[f64], sample_rate: u32) -> SpectralFeatures {
    SpectralFeatures {
        low_energy: lagged_difference_energy(samples, LOW_BAND_LAG),
        mid_energy: lagged_difference_energy(samples, MID_BAND_LAG),
        high_energy: lagged_difference_energy(samples, HIGH_BAND_LAG),
        zero_crossing: zero_crossing_rate(samples),
        centroid: difference_centroid(samples, sample_rate),
        energy: mean_square(samples),
    }
}

/// Reduce one interleaved frame to mono. Multi-channel frames average
/// their first two channels.
pub fn frame_to_mono(frame: &[f64]) -> f64 {
    match frame {
        [] => 0.0,
        [mono] => *mono,
        [left, right, ..] => (left + right) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(len: usize, freq: f64, rate: u32) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f64 / rate as f64).sin())
            .collect()
    }

    #[test]
    fn test_silence() {
        let f = compute_spectral_features(&vec![0.0; 1000], 44100);
        assert_eq!(f.energy, 0.0);
        assert_eq!(f.zero_crossing, 0.0);
        assert_eq!(f.low_energy, 0.0);
        assert_eq!(f.mid_energy, 0.0);
        assert_eq!(f.high_energy, 0.0);
        assert_eq!(f.centroid, 44100.0 / 4.0);
    }

    #[test]
    fn test_sine_features_in_range() {
        let f = compute_spectral_features(&sine(2000, 100.0, 44100), 44100);
        assert!(f.energy > 0.0);
        assert!(f.zero_crossing > 0.0 && f.zero_crossing <= 1.0);
        assert!(f.centroid >= 0.0);
        // a 100 Hz tone moves more over 100 samples than over 5
        assert!(f.low_energy > f.high_energy);
    }

    #[test]
    fn test_noisy_signal_is_valid() {
        let samples: Vec<f64> = (0..1000)
            .map(|i| {
                let x = i as f64;
                (x * 0.1).sin() * 0.5 + (x * 0.3).sin() * 0.3 + (x * 0.7).sin() * 0.2
            })
            .collect();
        let f = compute_spectral_features(&samples, 44100);
        assert!(f.energy > 0.0);
        assert!((0.0..=1.0).contains(&f.zero_crossing));
    }

    #[test]
    fn test_frame_to_mono() {
        assert_eq!(frame_to_mono(&[0.5]), 0.5);
        assert_eq!(frame_to_mono(&[0.5, -0.5]), 0.0);
        assert_eq!(frame_to_mono(&[1.0, 0.0, 0.9, 0.9, 0.9, 0.9]), 0.5);
    }
}
