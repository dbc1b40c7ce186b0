//! Console output for the rename preview and run summary

use colorful::Colorful;
use std::collections::BTreeMap;

use crate::core::AnalysisReport;
use crate::record::AudioRecord;

/// Records grouped by category, categories sorted; empty category becomes
/// `Uncategorized`
pub fn group_by_category(records: &[AudioRecord]) -> BTreeMap<&str, Vec<&AudioRecord>> {
    let mut groups: BTreeMap<&str, Vec<&AudioRecord>> = BTreeMap::new();
    for record in records {
        let category = if record.category.is_empty() {
            "Uncategorized"
        } else {
            record.category.as_str()
        };
        groups.entry(category).or_default().push(record);
    }
    groups
}

/// One-line stream summary, e.g. `Duration: 1.250s | 48000Hz | 2ch | 24bit`
pub fn format_stream_line(record: &AudioRecord) -> Option<String> {
    let meta = record.metadata.as_ref()?;
    let mut parts = Vec::new();
    if meta.duration_secs > 0.0 {
        let estimated = if meta.duration_estimated { " (est.)" } else { "" };
        parts.push(format!("Duration: {:.3}s{}", meta.duration_secs, estimated));
    }
    if meta.sample_rate > 0 {
        parts.push(format!("{}Hz", meta.sample_rate));
    }
    if meta.channels > 0 {
        parts.push(format!("{}ch", meta.channels));
    }
    if meta.bit_depth > 0 {
        parts.push(format!("{}bit", meta.bit_depth));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

pub fn print_preview(records: &[AudioRecord], verbose: bool) {
    println!("\n=== Preview of Changes ===");

    for (category, group) in group_by_category(records) {
        println!("\n{}", format!("[{}] ({} files)", category, group.len()).cyan());
        for record in group {
            println!("  {}", record.original_name);
            let new_name = record.new_name.as_deref().unwrap_or(&record.original_name);
            println!("  → {}", new_name.to_string().green());

            if let Some(line) = format_stream_line(record) {
                println!("    {}", line);
            }
            if record.state.is_failed() {
                println!("    {}", "analysis failed, named from filename only".yellow());
            }
            if !record.tags().is_empty() {
                println!("    Tags: {}", record.tags().join(", "));
            }
            if verbose {
                if let Some(confidence) = record.confidence {
                    println!("    Confidence: {:.0}%", confidence * 100.0);
                } else if let Some(inferred) = &record.inferred {
                    println!(
                        "    Analysis suggested {} ({:.0}%), kept filename category",
                        inferred.category,
                        inferred.confidence * 100.0
                    );
                }
            }
        }
    }
}

pub fn print_summary(report: &AnalysisReport) {
    println!();
    println!("Analysed {} file(s)", report.records.len());
    if report.duplicate_groups > 0 {
        println!(
            "{}",
            format!("Found {} duplicate group(s)", report.duplicate_groups).yellow()
        );
    }
    if report.failed > 0 {
        println!(
            "{}",
            format!("{} file(s) could not be analysed", report.failed).red()
        );
    }
}
