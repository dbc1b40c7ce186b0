//! tidy-rename - Analyze and rename sound-effect libraries
//!
//! Scans a folder of audio files, classifies each one from its filename,
//! container metadata and a short spectral window, tags duplicates, and
//! renames everything into UE5 asset names (`A_<Pack>_<Category>_<Sub>`).
//!
//! ## Module Structure
//!
//! - `core` - Extraction, rule matching, scoring and the concurrent pipeline
//! - `record` - Per-file record and metadata types
//! - `organize` - Scanning, naming, moving and the manifest
//! - `cli` - Command-line interface
//! - `config` - Category rules and runtime settings
//! - `error` - Per-file analysis errors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tidy_rename::config::PipelineConfig;
//! use tidy_rename::core::AnalysisPipeline;
//!
//! let pipeline = AnalysisPipeline::new(PipelineConfig::default());
//! let report = pipeline.run(paths)?;
//!
//! for record in &report.records {
//!     println!("{} -> {}", record.original_name, record.category);
//! }
//! ```
//!
//! ## Classification
//!
//! | Evidence          | Source                          | Example                       |
//! |-------------------|---------------------------------|-------------------------------|
//! | Filename keywords | Ordered category rule table     | `gun_shot` → `SFX_Weapon`     |
//! | Stream facts      | Duration, channels, genre tag   | 6 channels → `Ambient`        |
//! | Spectral window   | Lagged-difference band energies | low-band heavy → `SFX_Impact` |
//!
//! Scores from all three are summed per category; the winner's confidence is
//! `min(score / 1.5, 1)` floored at 0.3.

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Category rules and settings
pub mod config;

// Per-file errors
pub mod error;

// Pack organisation
pub mod organize;

// Record model
pub mod record;

pub use config::{AnalysisConfig, OrganizeConfig, PipelineConfig};
pub use core::{AnalysisPipeline, AnalysisReport, AudioAnalyzer, RuleEngine};
pub use error::AnalysisError;
pub use record::{AnalysisState, AudioRecord, Metadata};
