// src/core/audio_tags.rs
//
// Descriptive tags derived from decoded metadata.

use crate::record::Metadata;

pub fn generate_audio_tags(meta: &Metadata) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    let d = meta.duration_secs;
    if d > 0.0 {
        let (length, bucket) = if d < 1.0 {
            ("short", "<1s")
        } else if d < 5.0 {
            ("short", "1-5s")
        } else if d < 30.0 {
            ("medium", "5-30s")
        } else {
            ("long", ">30s")
        };
        tags.push(length.to_string());
        tags.push(bucket.to_string());
    }

    match meta.channels {
        0 => {}
        1 => tags.push("mono".to_string()),
        2 => tags.push("stereo".to_string()),
        n => {
            tags.push("multichannel".to_string());
            tags.push(format!("{}ch", n));
        }
    }

    if meta.sample_rate > 0 {
        if meta.sample_rate >= 48000 {
            tags.push("hq".to_string());
        }
        tags.push(format!("{}kHz", meta.sample_rate / 1000));
    }

    if meta.bit_depth >= 24 {
        tags.push("hq".to_string());
        tags.push(format!("{}bit", meta.bit_depth));
    }

    if meta.bitrate >= 320_000 {
        tags.push("hq".to_string());
        tags.push("high-bitrate".to_string());
    }

    if meta.has_embedded_tags {
        tags.push("tagged".to_string());
        if let Some(genre) = meta.genre.as_deref().filter(|g| !g.is_empty()) {
            tags.push(format!("genre:{}", genre.to_lowercase()));
        }
    }

    tags
}
