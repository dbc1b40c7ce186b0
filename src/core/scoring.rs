// src/core/scoring.rs
//
// Confidence aggregation: fuses filename rule scores with metadata and
// spectral evidence into a single category and normalized confidence.

use crate::config::DEFAULT_CATEGORY;
use crate::record::{CategoryResult, Metadata, SpectralFeatures};

use super::rules::{has_weapon_context, RuleEngine};

/// Best score that maps to full confidence
const FULL_CONFIDENCE_SCORE: f64 = 1.5;
/// Reported confidence never drops below this
pub const MIN_CONFIDENCE: f64 = 0.3;

/// Category -> accumulated score, kept in first-insertion order.
///
/// Insertion order makes tie-breaks reproducible: on equal scores the
/// category that received evidence first wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryScores {
    entries: Vec<(String, f64)>,
}

impl CategoryScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: &str, weight: f64) {
        match self.entries.iter_mut().find(|(c, _)| c == category) {
            Some((_, score)) => *score += weight,
            None => self.entries.push((category.to_string(), weight)),
        }
    }

    /// Adjust a category only if it already has an entry
    pub fn adjust_existing(&mut self, category: &str, delta: f64) {
        if let Some((_, score)) = self.entries.iter_mut().find(|(c, _)| c == category) {
            *score += delta;
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, s)| *s)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(c, s)| (c.as_str(), *s))
    }

    /// Strictly highest positive score; earlier entries win ties
    pub fn best(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (category, score) in self.iter() {
            let current = best.map(|(_, s)| s).unwrap_or(0.0);
            if score > current {
                best = Some((category, score));
            }
        }
        best
    }
}

/// Duration, channel-count and genre evidence
pub fn apply_metadata_scoring(scores: &mut CategoryScores, meta: &Metadata, filename_lower: &str) {
    let genre = meta.genre_lower();
    let duration = meta.duration_secs;

    if duration > 0.0 {
        if duration < 2.0 {
            scores.add("SFX_UI", 0.6);
        } else if duration < 5.0 {
            scores.add("SFX", 0.4);
        } else if duration > 30.0 {
            scores.add("Ambient", 0.5);
            // long "fire" recordings are crackling fires, not gunfire
            if filename_lower.contains("fire") && !has_weapon_context(filename_lower) {
                scores.add("Ambient", 0.4);
                if scores.get("SFX_Weapon").is_some_and(|s| s > 0.0) {
                    scores.adjust_existing("SFX_Weapon", -0.3);
                }
            }
            if genre.as_deref().is_some_and(|g| g.contains("music")) {
                scores.add("Music", 0.6);
            }
        }
    }

    if meta.channels == 1 {
        scores.add("SFX", 0.3);
    } else if meta.channels >= 5 {
        scores.add("Ambient", 0.4);
    }

    if let Some(genre) = genre {
        if genre.contains("voice") || genre.contains("dialogue") {
            scores.add("SFX_Voice", 0.7);
        }
        if genre.contains("music") {
            scores.add("Music", 0.7);
        }
        if genre.contains("ambient") {
            scores.add("Ambient", 0.7);
        }
    }
}

/// Band-energy, zero-crossing and centroid evidence
pub fn apply_spectral_scoring(scores: &mut CategoryScores, sf: &SpectralFeatures) {
    // noisy / percussive
    if sf.zero_crossing > 0.15 {
        scores.add("SFX_Impact", 0.3);
        scores.add("SFX_Weapon", 0.3);
    }

    if sf.low_energy > 0.1 && sf.low_energy > sf.mid_energy && sf.low_energy > sf.high_energy {
        scores.add("SFX_Impact", 0.4);
    }

    if sf.high_energy > 0.05 && sf.high_energy > sf.mid_energy {
        scores.add("SFX_UI", 0.3);
        scores.add("SFX_Impact", 0.2);
    }

    if sf.low_energy > 0.01 && sf.mid_energy > 0.01 && sf.high_energy > 0.01 {
        let min = sf.low_energy.min(sf.mid_energy).min(sf.high_energy);
        let max = sf.low_energy.max(sf.mid_energy).max(sf.high_energy);
        if min / max > 0.3 {
            scores.add("Ambient", 0.3);
            scores.add("Music", 0.2);
        }
    }

    if sf.centroid < 500.0 {
        scores.add("Ambient", 0.2);
    } else if sf.centroid > 2000.0 {
        scores.add("SFX_UI", 0.2);
    }
}

/// Map a winning score onto [MIN_CONFIDENCE, 1.0]
pub fn normalize_confidence(best_score: f64) -> f64 {
    (best_score / FULL_CONFIDENCE_SCORE)
        .min(1.0)
        .max(MIN_CONFIDENCE)
}

/// Pick the winner from a finished score map
pub fn select_category(scores: &CategoryScores) -> CategoryResult {
    match scores.best() {
        Some((category, score)) => CategoryResult {
            category: category.to_string(),
            confidence: normalize_confidence(score),
        },
        None => CategoryResult {
            category: DEFAULT_CATEGORY.to_string(),
            confidence: MIN_CONFIDENCE,
        },
    }
}

/// Full fusion: filename rules, then metadata, then spectral features
pub fn infer_category_with_confidence(
    rules: &RuleEngine<'_>,
    filename: &str,
    meta: Option<&Metadata>,
) -> CategoryResult {
    let filename_lower = filename.to_lowercase();
    let mut scores = rules.score_all_categories(&filename_lower);

    if let Some(meta) = meta {
        apply_metadata_scoring(&mut scores, meta, &filename_lower);
        if let Some(sf) = &meta.spectral {
            apply_spectral_scoring(&mut scores, sf);
        }
    }

    select_category(&scores)
}
