//! CLI argument parsing

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{OrganizeConfig, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "tidy-rename", version)]
#[command(about = "Analyze, categorize and rename sound-effect libraries into UE5 asset names")]
pub struct Args {
    /// Source directory containing audio files
    #[arg(short, long)]
    pub source: PathBuf,

    /// Pack name used in generated asset names
    #[arg(short, long)]
    pub pack: String,

    /// Output directory (default: source directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview changes without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Keep the source folder layout instead of per-category folders
    #[arg(long)]
    pub no_organize: bool,

    /// Skip writing manifest.json
    #[arg(long)]
    pub no_manifest: bool,

    /// Maximum analysis worker threads
    #[arg(short, long, env = "TIDY_RENAME_WORKERS")]
    pub workers: Option<usize>,

    /// JSON file with pipeline settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn organize_config(&self) -> OrganizeConfig {
        let mut config = OrganizeConfig::new(&self.source, &self.pack);
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        config.dry_run = self.dry_run;
        config.organize = !self.no_organize;
        config.create_manifest = !self.no_manifest;
        config
    }

    /// Config file settings, then flag overrides
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        Ok(config)
    }
}
