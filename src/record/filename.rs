//! Filename parsing: library ID, source code, category and filename tags

use crate::core::RuleEngine;

/// What a sound-library filename says about itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub id: Option<String>,
    pub source: Option<String>,
    pub category: String,
    pub sub_category: String,
    pub tags: Vec<String>,
}

impl ParsedName {
    /// Parse names like `PE-Horror_BW.28968.wav` or `scream_male_123.wav`
    pub fn parse(original_name: &str, rules: &RuleEngine<'_>) -> Self {
        let mut name = strip_extension(original_name);

        // trailing ".12345" is the library ID
        let mut id = None;
        if let Some((rest, digits)) = name.rsplit_once('.') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                id = Some(digits.to_string());
                name = rest;
            }
        }

        // last underscore segment is the source/library code
        let mut source = None;
        if let Some((rest, last)) = name.rsplit_once('_') {
            source = Some(last.to_string());
            name = rest;
        }

        let (category, sub_category) = match name.split_once('-') {
            Some((cat, sub)) if !cat.is_empty() => (cat.to_string(), sub.to_string()),
            _ => (rules.match_best_category(name).to_string(), name.to_string()),
        };
        let category = rules.normalize_category(&category);

        let tags = filename_tags(original_name, &category, &sub_category, source.as_deref());

        Self {
            id,
            source,
            category,
            sub_category,
            tags,
        }
    }
}

fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => name,
    }
}

fn filename_tags(
    original_name: &str,
    category: &str,
    sub_category: &str,
    source: Option<&str>,
) -> Vec<String> {
    let mut tags = Vec::new();

    if !category.is_empty() {
        tags.push(category.to_string());
    }

    let sub_lower = sub_category.to_lowercase().replace('_', " ");
    tags.extend(
        sub_lower
            .split_whitespace()
            .filter(|word| word.chars().count() > 2)
            .map(str::to_string),
    );

    if let Some(source) = source {
        tags.push(format!("src:{}", source));
    }

    let name_lower = original_name.to_lowercase();
    if name_lower.contains("lfe") {
        tags.extend(["lfe".to_string(), "low-frequency".to_string()]);
    }
    if name_lower.contains("processed") {
        tags.extend(["processed".to_string(), "fx".to_string()]);
    }
    if name_lower.contains("attacked") || name_lower.contains("pain") {
        tags.extend(["combat".to_string(), "damage".to_string()]);
    }

    tags
}
