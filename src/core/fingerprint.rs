// src/core/fingerprint.rs
//
// Metadata fingerprint for exact-duplicate detection.
//
// Only declared facts are hashed, never waveform content: two different
// recordings with the same rate, channels, depth, whole seconds, format and
// title are reported as duplicates.

use sha2::{Digest, Sha256};

use crate::record::Metadata;

/// Digest bytes kept (32 hex characters)
pub const FINGERPRINT_BYTES: usize = 16;

/// `rate|channels|depth|whole seconds|format|title`
pub fn fingerprint_input(meta: &Metadata) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}",
        meta.sample_rate,
        meta.channels,
        meta.bit_depth,
        meta.duration_secs.max(0.0).floor() as u64,
        meta.format,
        meta.title.as_deref().unwrap_or(""),
    )
}

/// SHA-256 of the fingerprint input, truncated and hex encoded
pub fn generate_fingerprint(meta: &Metadata) -> String {
    let digest = Sha256::digest(fingerprint_input(meta).as_bytes());
    digest[..FINGERPRINT_BYTES]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_meta() -> Metadata {
        Metadata {
            sample_rate: 44100,
            channels: 2,
            bit_depth: 16,
            duration_secs: 5.0,
            format: "WAV".into(),
            title: Some("Test".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let meta = wav_meta();
        let fp = generate_fingerprint(&meta);
        assert_eq!(fp, generate_fingerprint(&meta));
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_whole_seconds_only() {
        let a = wav_meta();
        let b = Metadata {
            duration_secs: 5.9,
            ..wav_meta()
        };
        assert_eq!(generate_fingerprint(&a), generate_fingerprint(&b));
    }

    #[test]
    fn test_each_field_changes_fingerprint() {
        let base = generate_fingerprint(&wav_meta());
        let variants = [
            Metadata { sample_rate: 48000, ..wav_meta() },
            Metadata { channels: 1, ..wav_meta() },
            Metadata { bit_depth: 24, ..wav_meta() },
            Metadata { duration_secs: 6.0, ..wav_meta() },
            Metadata { format: "MP3".into(), ..wav_meta() },
            Metadata { title: None, ..wav_meta() },
        ];
        for variant in &variants {
            assert_ne!(generate_fingerprint(variant), base, "{:?}", variant);
        }
    }

    #[test]
    fn test_unrelated_fields_ignored() {
        let a = wav_meta();
        let b = Metadata {
            artist: Some("Someone".into()),
            bitrate: 1_411_200,
            ..wav_meta()
        };
        assert_eq!(generate_fingerprint(&a), generate_fingerprint(&b));
    }

    #[test]
    fn test_input_layout() {
        assert_eq!(fingerprint_input(&wav_meta()), "44100|2|16|5|WAV|Test");
    }
}
