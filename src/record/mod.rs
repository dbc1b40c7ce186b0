//! Record model: per-file state shared by analysis, naming and manifest

mod filename;
mod types;

pub use filename::ParsedName;
pub use types::{AnalysisState, AudioRecord, CategoryResult, Metadata, SpectralFeatures};
