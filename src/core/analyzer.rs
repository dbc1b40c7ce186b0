// src/core/analyzer.rs
//
// Per-file analysis API with builder pattern.

use std::path::Path;

use super::audio_tags::generate_audio_tags;
use super::extractor::FeatureExtractor;
use super::rules::RuleEngine;
use super::scoring::infer_category_with_confidence;
use crate::config::{AnalysisConfig, CategoryRule};
use crate::error::Result;
use crate::record::{CategoryResult, Metadata};

/// Everything one job produces for one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileAnalysis {
    pub metadata: Metadata,
    pub category: CategoryResult,
    pub audio_tags: Vec<String>,
}

/// Builder for AudioAnalyzer configuration
pub struct AnalyzerBuilder {
    config: AnalysisConfig,
    rules: RuleEngine<'static>,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
            rules: RuleEngine::default(),
        }
    }

    pub fn spectral(mut self, enabled: bool) -> Self {
        self.config.spectral_enabled = enabled;
        self
    }

    pub fn max_spectral_frames(mut self, frames: usize) -> Self {
        self.config.max_spectral_frames = frames;
        self
    }

    pub fn min_spectral_samples(mut self, samples: usize) -> Self {
        self.config.min_spectral_samples = samples;
        self
    }

    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rules(mut self, rules: &'static [CategoryRule]) -> Self {
        self.rules = RuleEngine::new(rules);
        self
    }

    pub fn build(self) -> AudioAnalyzer {
        AudioAnalyzer {
            extractor: FeatureExtractor::new(self.config),
            rules: self.rules,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts and classifies single files.
///
/// Holds no per-file state, so one instance is shared by every worker.
pub struct AudioAnalyzer {
    extractor: FeatureExtractor,
    rules: RuleEngine<'static>,
}

impl AudioAnalyzer {
    /// Analyzer with default settings and the built-in rule table
    pub fn new() -> Self {
        AnalyzerBuilder::new().build()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        AnalyzerBuilder::new().config(config).build()
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn rules(&self) -> &RuleEngine<'static> {
        &self.rules
    }

    /// Extract → classify → tag. The fingerprint comes with the metadata.
    ///
    /// `file_name` is the original name including its extension; the
    /// filename rules see exactly what the user named the file.
    pub fn analyze_file(&self, path: &Path, file_name: &str) -> Result<FileAnalysis> {
        let metadata = self.extractor.extract(path)?;
        let category = self.classify(file_name, Some(&metadata));
        let audio_tags = generate_audio_tags(&metadata);

        Ok(FileAnalysis {
            metadata,
            category,
            audio_tags,
        })
    }

    /// Fuse filename, metadata and spectral evidence into one category
    pub fn classify(&self, file_name: &str, metadata: Option<&Metadata>) -> CategoryResult {
        infer_category_with_confidence(&self.rules, file_name, metadata)
    }
}

impl Default for AudioAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
