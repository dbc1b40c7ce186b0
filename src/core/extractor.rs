// src/core/extractor.rs
//
// Per-file feature extraction: embedded tags, container facts and, for WAV,
// a bounded spectral window. Uses Symphonia for tag/container probing and
// hound for the WAV header and samples.

use hound::{SampleFormat, WavReader};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::{MetadataOptions, MetadataRevision, StandardTagKey};
use symphonia::core::probe::Hint;

use super::dsp::{compute_spectral_features, frame_to_mono};
use super::fingerprint::generate_fingerprint;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::record::{Metadata, SpectralFeatures};

/// Extensions the analysis accepts
pub const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac", "aac", "m4a", "wma"];

/// Canonical RIFF/WAVE header size used for size-based duration estimates
const WAV_HEADER_BYTES: u64 = 44;
/// Bit depth assumed when a non-PCM WAV's track does not declare one
const ASSUMED_BIT_DEPTH: u16 = 16;

/// How a file is decoded, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Uncompressed PCM in RIFF/WAVE; the only kind with a spectral pass
    Wave,
    /// Codec containers where tags and track parameters are all we read
    Compressed,
    Unknown,
}

impl ContainerKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "wav" => ContainerKind::Wave,
            "mp3" | "ogg" | "flac" | "aac" | "m4a" | "wma" => ContainerKind::Compressed,
            _ => ContainerKind::Unknown,
        }
    }
}

#[derive(Debug, Default)]
struct EmbeddedTags {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    genre: Option<String>,
    year: Option<u32>,
    comment: Option<String>,
}

/// What Symphonia could tell about the container without decoding audio
#[derive(Debug, Default)]
struct ContainerProbe {
    tags: Option<EmbeddedTags>,
    codec: Option<&'static str>,
    sample_rate: Option<u32>,
    channels: Option<u16>,
    bits_per_sample: Option<u16>,
    n_frames: Option<u64>,
}

/// Reads one file into `Metadata`
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: AnalysisConfig,
}

impl FeatureExtractor {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Extract metadata for one file.
    ///
    /// The file handle lives only for this call. Tag and spectral problems
    /// are logged and skipped; a malformed WAV header or an I/O error fails
    /// the file.
    pub fn extract(&self, path: &Path) -> Result<Metadata> {
        let mut file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
        let file_size = file
            .metadata()
            .map_err(|e| AnalysisError::io(path, e))?
            .len();
        let ext = extension_of(path);

        let mut meta = Metadata::default();

        let probe = match probe_container(&file, &ext) {
            Ok(probe) => Some(probe),
            Err(e) => {
                debug!("{}: {}", path.display(), e);
                None
            }
        };
        if let Some(tags) = probe.as_ref().and_then(|p| p.tags.as_ref()) {
            apply_tags(&mut meta, tags);
        }

        file.seek(SeekFrom::Start(0))
            .map_err(|e| AnalysisError::io(path, e))?;

        match ContainerKind::from_extension(&ext) {
            ContainerKind::Wave => {
                self.read_wave(&mut file, path, file_size, probe.as_ref(), &mut meta)?
            }
            ContainerKind::Compressed => apply_container_facts(&mut meta, probe.as_ref(), &ext, file_size),
            ContainerKind::Unknown => meta.format = ext,
        }

        if meta.has_stream_facts() {
            meta.fingerprint = Some(generate_fingerprint(&meta));
        }

        Ok(meta)
    }

    fn read_wave(
        &self,
        file: &mut File,
        path: &Path,
        file_size: u64,
        probe: Option<&ContainerProbe>,
        meta: &mut Metadata,
    ) -> Result<()> {
        let reader = match WavReader::new(BufReader::new(file)) {
            Ok(reader) => reader,
            // valid RIFF/WAVE with a codec hound does not decode (A-law, ADPCM)
            Err(hound::Error::Unsupported) => {
                debug!("{}: non-PCM WAV, using container facts", path.display());
                apply_wave_container_facts(meta, probe, file_size);
                return Ok(());
            }
            Err(e) => return Err(wav_error(path, e)),
        };
        let spec = reader.spec();

        meta.format = "WAV".to_string();
        meta.sample_rate = spec.sample_rate;
        meta.channels = spec.channels;
        meta.bit_depth = spec.bits_per_sample;

        if meta.sample_rate > 0 {
            let frames = reader.duration();
            if frames > 0 {
                meta.duration_secs = frames as f64 / meta.sample_rate as f64;
            } else if let Some(secs) =
                estimate_wav_duration(file_size, meta.sample_rate, meta.channels, meta.bit_depth)
            {
                debug!("{}: duration estimated from file size", path.display());
                meta.duration_secs = secs;
                meta.duration_estimated = true;
            }
        }

        meta.bitrate = pcm_bitrate(meta.sample_rate, meta.channels, meta.bit_depth);

        if self.config.spectral_enabled {
            match self.read_spectral_window(reader, meta.sample_rate) {
                Ok(features) => meta.spectral = Some(features),
                Err(e) if e.is_recoverable() => {
                    debug!("{}: spectral pass skipped: {}", path.display(), e)
                }
                Err(e) => warn!("{}: spectral pass failed: {}", path.display(), e),
            }
        }

        Ok(())
    }

    /// Read up to `min(window × rate, cap)` mono frames and compute features
    fn read_spectral_window<R: Read>(
        &self,
        mut reader: WavReader<R>,
        sample_rate: u32,
    ) -> Result<SpectralFeatures> {
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;
        let wanted = self.config.spectral_frames(sample_rate) * channels;

        // a read error ends the window early; whatever was read still counts
        let interleaved: Vec<f64> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .take(wanted)
                .map_while(|s| s.ok())
                .map(f64::from)
                .collect(),
            SampleFormat::Int => {
                let full_scale = full_scale(spec.bits_per_sample);
                reader
                    .samples::<i32>()
                    .take(wanted)
                    .map_while(|s| s.ok())
                    .map(|s| s as f64 / full_scale)
                    .collect()
            }
        };

        let mono: Vec<f64> = interleaved.chunks_exact(channels).map(frame_to_mono).collect();

        if mono.len() < self.config.min_spectral_samples {
            return Err(AnalysisError::InsufficientSamples {
                found: mono.len(),
                required: self.config.min_spectral_samples,
            });
        }

        Ok(compute_spectral_features(&mono, sample_rate))
    }
}

/// Probe tags and default-track parameters. Any failure here is a
/// `TagReadFailure` and never fatal to the caller.
fn probe_container(file: &File, ext: &str) -> Result<ContainerProbe> {
    let handle = file
        .try_clone()
        .map_err(|e| AnalysisError::TagReadFailure(e.to_string()))?;
    let mss = MediaSourceStream::new(Box::new(handle), Default::default());

    let mut hint = Hint::new();
    if !ext.is_empty() {
        hint.with_extension(ext);
    }

    let mut probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AnalysisError::TagReadFailure(e.to_string()))?;

    let mut probe = ContainerProbe::default();

    if let Some(track) = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
    {
        let params = &track.codec_params;
        probe.codec = symphonia::default::get_codecs()
            .get_codec(params.codec)
            .map(|d| d.short_name);
        probe.sample_rate = params.sample_rate;
        probe.channels = params.channels.map(|c| c.count() as u16);
        probe.bits_per_sample = params.bits_per_sample.map(|b| b as u16);
        probe.n_frames = params.n_frames;
    }

    let mut tags = EmbeddedTags::default();
    let mut found = false;

    if let Some(metadata) = probed.metadata.get() {
        if let Some(revision) = metadata.current() {
            found |= collect_tags(revision, &mut tags);
        }
    }
    let format_metadata = probed.format.metadata();
    if let Some(revision) = format_metadata.current() {
        found |= collect_tags(revision, &mut tags);
    }

    if found {
        probe.tags = Some(tags);
    }
    Ok(probe)
}

/// Merge one tag revision into `tags`; first value wins per field
fn collect_tags(revision: &MetadataRevision, tags: &mut EmbeddedTags) -> bool {
    let mut found = false;
    for tag in revision.tags() {
        let value = tag.value.to_string().trim().to_string();
        if value.is_empty() {
            continue;
        }
        found = true;
        match tag.std_key {
            Some(StandardTagKey::TrackTitle) => fill(&mut tags.title, value),
            Some(StandardTagKey::Artist) => fill(&mut tags.artist, value),
            Some(StandardTagKey::Album) => fill(&mut tags.album, value),
            Some(StandardTagKey::Genre) => fill(&mut tags.genre, value),
            Some(StandardTagKey::Comment) => fill(&mut tags.comment, value),
            Some(StandardTagKey::Date)
            | Some(StandardTagKey::ReleaseDate)
            | Some(StandardTagKey::OriginalDate) => {
                if tags.year.is_none() {
                    tags.year = parse_year(&value);
                }
            }
            _ => {}
        }
    }
    found
}

fn fill(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn apply_tags(meta: &mut Metadata, tags: &EmbeddedTags) {
    meta.has_embedded_tags = true;
    meta.title = tags.title.clone();
    meta.artist = tags.artist.clone();
    meta.album = tags.album.clone();
    meta.genre = tags.genre.clone();
    meta.year = tags.year;
    meta.comment = tags.comment.clone();
}

/// Format label and stream facts for compressed containers. Duration comes
/// from the container's declared frame count; the average bitrate follows
/// from it and the file size.
fn apply_container_facts(
    meta: &mut Metadata,
    probe: Option<&ContainerProbe>,
    ext: &str,
    file_size: u64,
) {
    meta.format = probe
        .and_then(|p| p.codec)
        .map(str::to_uppercase)
        .unwrap_or_else(|| ext.to_string());

    let Some(probe) = probe else {
        return;
    };

    meta.sample_rate = probe.sample_rate.unwrap_or(0);
    meta.channels = probe.channels.unwrap_or(0);
    meta.bit_depth = probe.bits_per_sample.unwrap_or(0);

    if let (Some(frames), Some(rate)) = (probe.n_frames, probe.sample_rate) {
        if frames > 0 && rate > 0 {
            meta.duration_secs = frames as f64 / rate as f64;
        }
    }

    if meta.duration_secs > 0.0 {
        meta.bitrate = average_bitrate(file_size, meta.duration_secs);
    }
}

/// Stream facts for a WAV whose codec hound cannot read. Symphonia's probe
/// still knows rate, channels and the frame count from the fmt and data
/// chunks; there is no spectral pass.
fn apply_wave_container_facts(
    meta: &mut Metadata,
    probe: Option<&ContainerProbe>,
    file_size: u64,
) {
    meta.format = "WAV".to_string();

    let Some(probe) = probe else {
        return;
    };

    meta.sample_rate = probe.sample_rate.unwrap_or(0);
    meta.channels = probe.channels.unwrap_or(0);
    meta.bit_depth = probe
        .bits_per_sample
        .filter(|b| *b > 0)
        .unwrap_or(ASSUMED_BIT_DEPTH);

    match (probe.n_frames, probe.sample_rate) {
        (Some(frames), Some(rate)) if frames > 0 && rate > 0 => {
            meta.duration_secs = frames as f64 / rate as f64;
        }
        _ => {
            if let Some(secs) =
                estimate_wav_duration(file_size, meta.sample_rate, meta.channels, meta.bit_depth)
            {
                meta.duration_secs = secs;
                meta.duration_estimated = true;
            }
        }
    }

    meta.bitrate = pcm_bitrate(meta.sample_rate, meta.channels, meta.bit_depth);
}

/// `(size − header) / (channels × bytes per sample)` frames at `sample_rate`
pub fn estimate_wav_duration(
    file_size: u64,
    sample_rate: u32,
    channels: u16,
    bit_depth: u16,
) -> Option<f64> {
    let bytes_per_sample = (bit_depth / 8) as u64;
    if sample_rate == 0 || channels == 0 || bytes_per_sample == 0 {
        return None;
    }
    let data_bytes = file_size.checked_sub(WAV_HEADER_BYTES)?;
    let frames = data_bytes / (channels as u64 * bytes_per_sample);
    (frames > 0).then(|| frames as f64 / sample_rate as f64)
}

/// `rate × channels × bits`, or 0 when any factor is unknown or the
/// product does not fit
pub fn pcm_bitrate(sample_rate: u32, channels: u16, bit_depth: u16) -> u32 {
    sample_rate
        .checked_mul(channels as u32)
        .and_then(|v| v.checked_mul(bit_depth as u32))
        .unwrap_or(0)
}

/// Bits per second over the whole file, 0 when out of range
pub fn average_bitrate(file_size: u64, duration_secs: f64) -> u32 {
    if duration_secs <= 0.0 {
        return 0;
    }
    let Some(bits) = file_size.checked_mul(8) else {
        return 0;
    };
    let rate = (bits as f64 / duration_secs).round();
    if rate.is_finite() && rate <= u32::MAX as f64 {
        rate as u32
    } else {
        0
    }
}

fn full_scale(bits_per_sample: u16) -> f64 {
    let bits = bits_per_sample.clamp(1, 32);
    (1u64 << (bits - 1)) as f64
}

fn parse_year(value: &str) -> Option<u32> {
    let digits: String = value.chars().take(4).collect();
    if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

fn wav_error(path: &Path, err: hound::Error) -> AnalysisError {
    match err {
        hound::Error::IoError(e) if e.kind() != std::io::ErrorKind::UnexpectedEof => {
            AnalysisError::io(path, e)
        }
        other => AnalysisError::invalid_container(path, other.to_string()),
    }
}
