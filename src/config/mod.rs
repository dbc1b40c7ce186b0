//! Configuration module for tidy-rename

mod rules;
mod settings;

pub use rules::{
    synonym, CategoryRule, FireHandling, CATEGORY_RULES, CATEGORY_SYNONYMS, DEFAULT_CATEGORY,
    WEAPON_CONTEXT,
};
pub use settings::{AnalysisConfig, OrganizeConfig, PipelineConfig, DEFAULT_WORKERS};
