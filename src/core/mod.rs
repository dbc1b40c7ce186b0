//! Core analysis modules: extraction, rules, scoring and the batch pipeline

pub mod analyzer;
pub mod audio_tags;
pub mod dsp;
pub mod extractor;
pub mod fingerprint;
pub mod pipeline;
pub mod rules;
pub mod scoring;

pub use analyzer::{AnalyzerBuilder, AudioAnalyzer, FileAnalysis};
pub use audio_tags::generate_audio_tags;
pub use dsp::compute_spectral_features;
pub use extractor::{ContainerKind, FeatureExtractor, SUPPORTED_EXTENSIONS};
pub use fingerprint::generate_fingerprint;
pub use pipeline::{detect_duplicates, AnalysisPipeline, AnalysisReport, FingerprintIndex};
pub use rules::{normalize_category, RuleEngine};
pub use scoring::{infer_category_with_confidence, CategoryScores};
