//! `manifest.json` describing a processed pack

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::mover::UNCATEGORIZED_DIR;
use crate::record::AudioRecord;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub total_files: usize,
    /// RFC 3339, UTC
    pub generated_at: String,
    pub categories: BTreeMap<String, usize>,
    pub duplicate_groups: usize,
    pub failed_files: usize,
    pub files: Vec<AudioRecord>,
}

impl Manifest {
    pub fn new(records: &[AudioRecord], duplicate_groups: usize) -> Self {
        Self {
            total_files: records.len(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            categories: category_stats(records),
            duplicate_groups,
            failed_files: records.iter().filter(|r| r.state.is_failed()).count(),
            files: records.to_vec(),
        }
    }

    /// Write pretty JSON into `output_dir`; returns the file path
    pub fn write_to(&self, output_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;
        let path = output_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self).context("Failed to serialize manifest")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        Ok(path)
    }
}

/// Files per category; an empty category counts as `Uncategorized`
pub fn category_stats(records: &[AudioRecord]) -> BTreeMap<String, usize> {
    let mut stats = BTreeMap::new();
    for record in records {
        let category = if record.category.is_empty() {
            UNCATEGORIZED_DIR.to_string()
        } else {
            record.category.clone()
        };
        *stats.entry(category).or_insert(0) += 1;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AnalysisState;
    use tempfile::TempDir;

    fn records() -> Vec<AudioRecord> {
        let mut a = AudioRecord::new("/src/a.wav");
        a.category = "SFX_Voice".into();
        let mut b = AudioRecord::new("/src/b.wav");
        b.category = "SFX_Voice".into();
        b.state = AnalysisState::Failed("bad header".into());
        let mut c = AudioRecord::new("/src/c.wav");
        c.category = String::new();
        vec![a, b, c]
    }

    #[test]
    fn test_category_stats() {
        let stats = category_stats(&records());
        assert_eq!(stats.get("SFX_Voice"), Some(&2));
        assert_eq!(stats.get("Uncategorized"), Some(&1));
    }

    #[test]
    fn test_manifest_written() {
        let dir = TempDir::new().unwrap();
        let manifest = Manifest::new(&records(), 0);
        assert_eq!(manifest.failed_files, 1);

        let path = manifest.write_to(dir.path()).unwrap();
        let text = fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["total_files"], 3);
        assert_eq!(value["categories"]["SFX_Voice"], 2);
        assert_eq!(value["files"].as_array().unwrap().len(), 3);
        assert!(chrono::DateTime::parse_from_rfc3339(value["generated_at"].as_str().unwrap()).is_ok());
    }
}
