// src/core/pipeline.rs
//
// Bounded worker pool over a batch of files. Jobs own their inputs and send
// one result each; the calling thread is the only writer of records and of
// the fingerprint index.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashMap};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};

use super::analyzer::{AudioAnalyzer, FileAnalysis};
use crate::config::PipelineConfig;
use crate::error::AnalysisError;
use crate::record::{AnalysisState, AudioRecord};

/// Outcome of analysing a batch
#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    /// Same order as the input paths
    pub records: Vec<AudioRecord>,
    pub duplicate_groups: usize,
    pub failed: usize,
}

impl AnalysisReport {
    /// Records per category, sorted by category name
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Record indices grouped by metadata fingerprint
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    groups: HashMap<String, Vec<usize>>,
}

impl FingerprintIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every record that carries a non-empty fingerprint
    pub fn from_records(records: &[AudioRecord]) -> Self {
        let mut index = Self::new();
        for (i, record) in records.iter().enumerate() {
            if let Some(fp) = record.fingerprint() {
                index.insert(fp, i);
            }
        }
        index
    }

    pub fn insert(&mut self, fingerprint: &str, record_index: usize) {
        if fingerprint.is_empty() {
            return;
        }
        self.groups
            .entry(fingerprint.to_string())
            .or_default()
            .push(record_index);
    }

    /// Groups with two or more members. Members ascend; groups are ordered
    /// by their smallest member.
    pub fn duplicate_groups(&self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = self
            .groups
            .values()
            .filter(|members| members.len() > 1)
            .map(|members| {
                let mut members = members.clone();
                members.sort_unstable();
                members
            })
            .collect();
        groups.sort_by_key(|members| members[0]);
        groups
    }

    /// Append `duplicate` and `duplicate-group-N` to every member of every
    /// group. Returns the number of groups.
    pub fn tag_duplicates(&self, records: &mut [AudioRecord]) -> usize {
        let groups = self.duplicate_groups();
        for (n, members) in groups.iter().enumerate() {
            let group_tag = format!("duplicate-group-{}", n + 1);
            for &i in members {
                if let Some(record) = records.get_mut(i) {
                    record.push_tag("duplicate");
                    record.push_tag(group_tag.clone());
                }
            }
        }
        groups.len()
    }
}

/// Tag records sharing a fingerprint; returns the number of groups
pub fn detect_duplicates(records: &mut [AudioRecord]) -> usize {
    FingerprintIndex::from_records(records).tag_duplicates(records)
}

struct JobResult {
    index: usize,
    outcome: crate::error::Result<FileAnalysis>,
}

/// Fan-out/fan-in analysis over a bounded thread pool
pub struct AnalysisPipeline {
    config: PipelineConfig,
    analyzer: Arc<AudioAnalyzer>,
}

impl AnalysisPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let analyzer = AudioAnalyzer::with_config(config.analysis.clone());
        Self {
            config,
            analyzer: Arc::new(analyzer),
        }
    }

    pub fn analyzer(&self) -> &AudioAnalyzer {
        &self.analyzer
    }

    /// Seed one record per path from its filename
    pub fn build_records(&self, paths: Vec<PathBuf>) -> Vec<AudioRecord> {
        paths
            .into_iter()
            .map(|path| AudioRecord::from_path(path, self.analyzer.rules()))
            .collect()
    }

    /// Build records from `paths` and analyse them
    pub fn run(&self, paths: Vec<PathBuf>) -> Result<AnalysisReport> {
        let records = self.build_records(paths);
        self.analyze_records(records)
    }

    /// Analyse pre-built records in place.
    ///
    /// Per-file failures end up in the record state; only failing to start
    /// the pool is an error.
    pub fn analyze_records(&self, mut records: Vec<AudioRecord>) -> Result<AnalysisReport> {
        if records.is_empty() {
            return Ok(AnalysisReport::default());
        }

        let workers = self.config.worker_count(records.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("analysis-{}", i))
            .build()
            .context("Failed to start analysis worker pool")?;
        debug!("Analysing {} files on {} workers", records.len(), workers);

        let progress = self.progress_bar(records.len() as u64);
        let (tx, rx) = mpsc::channel::<JobResult>();

        for (index, record) in records.iter_mut().enumerate() {
            record.state = AnalysisState::Extracting;

            let tx = tx.clone();
            let analyzer = Arc::clone(&self.analyzer);
            let path = record.path.clone();
            let name = record.original_name.clone();

            pool.spawn(move || {
                let outcome = run_job(&analyzer, &path, &name);
                // the receiver outlives every job
                let _ = tx.send(JobResult { index, outcome });
            });
        }
        drop(tx);

        let mut fingerprints = FingerprintIndex::new();
        let mut failed = 0;

        for result in rx {
            progress.inc(1);
            let Some(record) = records.get_mut(result.index) else {
                continue;
            };
            match result.outcome {
                Ok(analysis) => {
                    if let Some(fp) = analysis.metadata.fingerprint.as_deref() {
                        fingerprints.insert(fp, result.index);
                    }
                    apply_analysis(record, analysis);
                }
                Err(e) => {
                    warn!("{}: {}", record.path.display(), e);
                    record.state = AnalysisState::Failed(e.to_string());
                    failed += 1;
                }
            }
        }
        progress.finish_and_clear();

        let duplicate_groups = fingerprints.tag_duplicates(&mut records);
        info!(
            "Analysed {} files: {} failed, {} duplicate groups",
            records.len(),
            failed,
            duplicate_groups
        );

        Ok(AnalysisReport {
            records,
            duplicate_groups,
            failed,
        })
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        let pb = ProgressBar::new(len);
        if !self.config.show_progress {
            pb.set_draw_target(ProgressDrawTarget::hidden());
            return pb;
        }
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Analysing");
        pb
    }
}

/// Successful job: store metadata, replace an undecided category, append tags.
///
/// `confidence` only describes the category the record ends up with; a
/// filename category that the analysis disagrees with keeps no confidence.
pub fn apply_analysis(record: &mut AudioRecord, analysis: FileAnalysis) {
    let inferred = analysis.category;
    if record.has_default_category() {
        record.category = inferred.category.clone();
    }
    record.confidence = (record.category == inferred.category).then_some(inferred.confidence);
    record.inferred = Some(inferred);
    record.extend_tags(analysis.audio_tags);
    record.metadata = Some(analysis.metadata);
    record.state = AnalysisState::Scored;
}

fn run_job(analyzer: &AudioAnalyzer, path: &Path, name: &str) -> crate::error::Result<FileAnalysis> {
    panic::catch_unwind(AssertUnwindSafe(|| analyzer.analyze_file(path, name)))
        .unwrap_or_else(|payload| Err(AnalysisError::WorkerPanic(panic_message(&*payload))))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
