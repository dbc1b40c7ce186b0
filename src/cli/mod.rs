// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

pub use args::Args;
pub use output::{format_stream_line, group_by_category, print_preview, print_summary};

use anyhow::{bail, Result};
use colorful::Colorful;
use log::info;

use crate::core::AnalysisPipeline;
use crate::organize::{apply_moves, assign_names, collect_audio_files, Manifest};

/// Scan → analyse → name → preview → move → manifest
pub fn run(args: Args) -> Result<()> {
    let organize = args.organize_config();
    let pipeline_config = args.pipeline_config()?;

    if !organize.source_dir.is_dir() {
        bail!(
            "Source directory does not exist: {}",
            organize.source_dir.display()
        );
    }

    let skip = (organize.output_dir != organize.source_dir).then_some(organize.output_dir.as_path());
    let files = collect_audio_files(&organize.source_dir, skip)?;
    if files.is_empty() {
        println!("{}", "No audio files found!".red());
        return Ok(());
    }
    println!("Found {} audio file(s)", files.len());

    let show_progress = pipeline_config.show_progress;
    let pipeline = AnalysisPipeline::new(pipeline_config);
    let mut report = pipeline.run(files)?;

    assign_names(&mut report.records, &organize.pack_name);
    print_preview(&report.records, args.verbose);
    print_summary(&report);

    if organize.dry_run {
        println!("\n{}", "Dry run - no files were changed".yellow());
        return Ok(());
    }

    println!("\n=== Applying Changes ===");
    let moved = apply_moves(&report.records, &organize, show_progress)?;
    info!("Moved {} file(s)", moved);

    if organize.create_manifest {
        let manifest = Manifest::new(&report.records, report.duplicate_groups);
        let path = manifest.write_to(&organize.output_dir)?;
        println!("{} Created manifest: {}", "✓".green(), path.display());
    }

    println!("\n{}", "✓ Processing complete!".green());
    Ok(())
}
