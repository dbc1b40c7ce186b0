//! Per-file record and decoded metadata types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::filename::ParsedName;
use crate::config::DEFAULT_CATEGORY;
use crate::core::RuleEngine;

/// Coarse windowed-difference features of a short sample window.
///
/// The three band energies are first-difference magnitudes at lags of
/// 100, 20 and 5 samples. They approximate low/mid/high frequency content
/// without a filter bank and carry no Hz boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralFeatures {
    pub low_energy: f64,
    pub mid_energy: f64,
    pub high_energy: f64,
    /// Sign changes per sample, in [0, 1]
    pub zero_crossing: f64,
    /// Hz-scaled brightness estimate
    pub centroid: f64,
    /// Mean squared amplitude
    pub energy: f64,
}

/// Facts decoded from one file. Built once by the extractor, then read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub duration_secs: f64,
    /// True when the duration came from the file-size estimate rather than the header
    pub duration_estimated: bool,
    pub sample_rate: u32,
    pub channels: u16,
    pub bit_depth: u16,
    /// Bits per second
    pub bitrate: u32,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub has_embedded_tags: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectral: Option<SpectralFeatures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl Metadata {
    /// Lowercased genre tag, only when embedded tags were read
    pub fn genre_lower(&self) -> Option<String> {
        if !self.has_embedded_tags {
            return None;
        }
        self.genre
            .as_deref()
            .filter(|g| !g.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether the stream header was understood well enough to fingerprint
    pub fn has_stream_facts(&self) -> bool {
        self.sample_rate > 0 && self.channels > 0
    }
}

/// Winning category and its normalized confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub category: String,
    pub confidence: f64,
}

/// Lifecycle of a record inside the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisState {
    #[default]
    Pending,
    Extracting,
    Scored,
    Failed(String),
}

impl AnalysisState {
    pub fn is_failed(&self) -> bool {
        matches!(self, AnalysisState::Failed(_))
    }
}

/// One input file and everything learned about it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioRecord {
    pub path: PathBuf,
    pub original_name: String,
    pub category: String,
    pub sub_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Confidence of `category`; unset when the category came from the
    /// filename and the analysis disagreed with it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// What the analysis inferred, adopted or not
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferred: Option<CategoryResult>,
    pub state: AnalysisState,
}

impl AudioRecord {
    /// Bare record with the default category and no tags
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let original_name = file_name_of(&path);
        Self {
            path,
            original_name,
            category: DEFAULT_CATEGORY.to_string(),
            sub_category: String::new(),
            source: None,
            id: None,
            new_name: None,
            tags: Vec::new(),
            metadata: None,
            confidence: None,
            inferred: None,
            state: AnalysisState::Pending,
        }
    }

    /// Record seeded from its filename: ID, source, category and filename tags
    pub fn from_path(path: impl Into<PathBuf>, rules: &RuleEngine<'_>) -> Self {
        let mut record = Self::new(path);
        let parsed = ParsedName::parse(&record.original_name, rules);
        record.category = parsed.category;
        record.sub_category = parsed.sub_category;
        record.source = parsed.source;
        record.id = parsed.id;
        record.extend_tags(parsed.tags);
        record
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Tags are append-only
    pub fn push_tag(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }

    pub fn extend_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
    }

    /// Whether the filename left the category undecided
    pub fn has_default_category(&self) -> bool {
        self.category.is_empty() || self.category == DEFAULT_CATEGORY
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.fingerprint.as_deref())
            .filter(|fp| !fp.is_empty())
    }

    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
