// src/config/settings.rs
//
// Analysis, pipeline and organize settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on concurrent analysis jobs
pub const DEFAULT_WORKERS: usize = 8;

/// Per-file analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Run the windowed spectral pass on WAV files
    pub spectral_enabled: bool,
    /// Hard cap on mono frames read for the spectral pass
    pub max_spectral_frames: usize,
    /// Seconds of audio the spectral window covers before the cap applies
    pub spectral_window_secs: f64,
    /// Below this many frames the spectral pass is skipped
    pub min_spectral_samples: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            spectral_enabled: true,
            max_spectral_frames: 8192,
            spectral_window_secs: 2.0,
            min_spectral_samples: 100,
        }
    }
}

impl AnalysisConfig {
    /// Frames to read for a given sample rate: min(window × rate, cap)
    pub fn spectral_frames(&self, sample_rate: u32) -> usize {
        if sample_rate == 0 {
            return self.max_spectral_frames;
        }
        let window = (self.spectral_window_secs * sample_rate as f64) as usize;
        window.min(self.max_spectral_frames)
    }
}

/// Settings for the concurrent analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum worker threads; clamped to the file count at run time
    pub workers: usize,
    /// Draw a progress bar while analysing
    pub show_progress: bool,
    pub analysis: AnalysisConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            show_progress: true,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load settings from a JSON file; missing fields fall back to defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = analysis;
        self
    }

    /// Pool size for a batch: the configured bound, never more than the files, never zero
    pub fn worker_count(&self, file_count: usize) -> usize {
        self.workers.max(1).min(file_count.max(1))
    }
}

/// Settings for the rename / move / manifest stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeConfig {
    pub source_dir: PathBuf,
    /// Defaults to the source directory
    pub output_dir: PathBuf,
    pub pack_name: String,
    pub dry_run: bool,
    /// Put files into per-category folders instead of mirroring the source tree
    pub organize: bool,
    pub create_manifest: bool,
}

impl OrganizeConfig {
    pub fn new(source_dir: impl Into<PathBuf>, pack_name: impl Into<String>) -> Self {
        let source_dir = source_dir.into();
        Self {
            output_dir: source_dir.clone(),
            source_dir,
            pack_name: pack_name.into(),
            dry_run: false,
            organize: true,
            create_manifest: true,
        }
    }
}
