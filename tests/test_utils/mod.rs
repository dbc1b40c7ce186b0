#![allow(dead_code)]

use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Shape of a synthesised WAV fixture
#[derive(Debug, Clone)]
pub struct WavFixture {
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub freq_hz: f64,
    pub amplitude: f64,
    pub float: bool,
}

impl Default for WavFixture {
    fn default() -> Self {
        Self {
            duration_secs: 1.0,
            sample_rate: 44100,
            channels: 1,
            bits_per_sample: 16,
            freq_hz: 220.0,
            amplitude: 0.5,
            float: false,
        }
    }
}

impl WavFixture {
    pub fn secs(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    pub fn rate(mut self, rate: u32) -> Self {
        self.sample_rate = rate;
        self
    }

    pub fn bits(mut self, bits: u16) -> Self {
        self.bits_per_sample = bits;
        self
    }

    /// 32-bit IEEE float samples
    pub fn float(mut self) -> Self {
        self.float = true;
        self.bits_per_sample = 32;
        self
    }

    pub fn silent(mut self) -> Self {
        self.amplitude = 0.0;
        self
    }

    /// Write a sine tone to `dir/name`
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: if self.float {
                hound::SampleFormat::Float
            } else {
                hound::SampleFormat::Int
            },
        };
        let mut writer = hound::WavWriter::create(&path, spec).expect("create wav");
        let full_scale = ((1i64 << (self.bits_per_sample - 1)) - 1) as f64;
        let frames = (self.duration_secs * self.sample_rate as f64) as usize;

        for i in 0..frames {
            let t = i as f64 / self.sample_rate as f64;
            let level = self.amplitude * (2.0 * PI * self.freq_hz * t).sin();
            for _ in 0..self.channels {
                if self.float {
                    writer.write_sample(level as f32).expect("write sample");
                } else {
                    writer
                        .write_sample((level * full_scale) as i32)
                        .expect("write sample");
                }
            }
        }
        writer.finalize().expect("finalize wav");
        path
    }
}

pub fn scratch_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

/// A `.wav` file that is not RIFF
pub fn write_corrupt_wav(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"this is not a riff header at all, just text").expect("write corrupt file");
    path
}

/// A `.wav` whose data chunk declares zero bytes while the samples are
/// still on disk, as left behind by an interrupted recorder
pub fn write_wav_without_data_length(dir: &Path, name: &str, fixture: &WavFixture) -> PathBuf {
    let path = fixture.write(dir, name);
    let mut bytes = fs::read(&path).expect("read wav");
    assert_eq!(&bytes[36..40], b"data", "fixture must use the 44-byte header");
    bytes[40..44].copy_from_slice(&0u32.to_le_bytes());
    fs::write(&path, bytes).expect("rewrite wav");
    path
}

/// Mono 8 kHz A-law WAV with `frames` bytes of silence
pub fn write_alaw_wav(dir: &Path, name: &str, frames: u32) -> PathBuf {
    let path = dir.join(name);
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(4 + 8 + 18 + 8 + frames).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&18u32.to_le_bytes());
    bytes.extend_from_slice(&6u16.to_le_bytes()); // WAVE_FORMAT_ALAW
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&frames.to_le_bytes());
    bytes.resize(bytes.len() + frames as usize, 0xd5);
    fs::write(&path, bytes).expect("write alaw wav");
    path
}

/// FLAC with a STREAMINFO block declaring `total_samples` mono 16-bit frames
/// at 44.1 kHz, followed by a single frame header. Enough for a container
/// probe; there is no audio to decode.
pub fn write_flac_stream_header(dir: &Path, name: &str, total_samples: u64) -> PathBuf {
    const RATE: u64 = 44100;
    const BLOCK: u16 = 256;

    let path = dir.join(name);
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"fLaC");
    // last metadata block, type STREAMINFO, 34 bytes
    bytes.extend_from_slice(&[0x80, 0x00, 0x00, 34]);
    bytes.extend_from_slice(&BLOCK.to_be_bytes());
    bytes.extend_from_slice(&BLOCK.to_be_bytes());
    bytes.extend_from_slice(&[0; 6]);
    // rate:20 | channels-1:3 (mono, 0) | bits-1:5 | total samples:36
    let packed = (RATE << 44) | (15 << 36) | (total_samples & 0xf_ffff_ffff);
    bytes.extend_from_slice(&packed.to_be_bytes());
    bytes.extend_from_slice(&[0; 16]);

    // fixed blocking, 256-sample block, 44.1 kHz, mono, 16-bit, frame 0
    let header = [0xff, 0xf8, 0x89, 0x08, 0x00];
    bytes.extend_from_slice(&header);
    bytes.push(crc8(&header));

    fs::write(&path, bytes).expect("write flac");
    path
}

/// CRC-8, polynomial 0x07, as used by FLAC frame headers
fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 { (crc << 1) ^ 0x07 } else { crc << 1 };
        }
    }
    crc
}

/// Names of the files directly under `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
