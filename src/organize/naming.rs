//! UE5 asset naming
//!
//! `A_<Pack>_<Category>_<SubCategory>.<ext>`, with the `SFX_` prefix dropped
//! from the category and repeated names numbered `_01`, `_02`, ...

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

use crate::record::AudioRecord;

static NOT_WORD_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("static pattern"));
static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").expect("static pattern"));
static NOT_PACK_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s\-_]").expect("static pattern"));
static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_]").expect("static pattern"));
static CAMEL_HUMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("static pattern"));

/// UE5 prefix for audio assets
pub const ASSET_PREFIX: &str = "A";

/// Capitalise the first letter and lowercase the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Keep `[A-Za-z0-9_]`, collapse underscore runs and trim them from both ends
fn squash_underscores(name: &str) -> String {
    let kept = NOT_WORD_CHAR.replace_all(name, "");
    UNDERSCORE_RUN
        .replace_all(&kept, "_")
        .trim_matches('_')
        .to_string()
}

/// Category folder name: dashes become underscores, other punctuation and
/// spaces are dropped, words capitalised.
pub fn clean_name(name: &str) -> String {
    squash_underscores(&name.replace('-', "_"))
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("_")
}

/// One name segment: dashes and spaces become underscores, words are
/// capitalised unless they start with a digit.
pub fn clean_name_part(name: &str) -> String {
    squash_underscores(&name.replace(['-', ' '], "_"))
        .split('_')
        .map(|word| {
            if word.starts_with(|c: char| c.is_ascii_digit()) {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Pack name in PascalCase: separators and camelCase humps split words,
/// which are then capitalised and joined.
pub fn clean_name_with_case(name: &str) -> String {
    let kept = NOT_PACK_CHAR.replace_all(name, "");
    let spaced = SEPARATOR.replace_all(&kept, " ");
    let spaced = CAMEL_HUMP.replace_all(&spaced, "$1 $2");

    spaced.split_whitespace().map(capitalize).collect()
}

/// Base UE5 name for one record, extension taken from the original file
pub fn generate_ue5_name(record: &AudioRecord, pack_name: &str) -> String {
    let mut parts = vec![ASSET_PREFIX.to_string()];

    let pack = clean_name_with_case(pack_name);
    if !pack.is_empty() {
        parts.push(pack);
    }

    let category = record
        .category
        .strip_prefix("SFX_")
        .unwrap_or(&record.category);
    let category = clean_name_part(category);
    if !category.is_empty() {
        parts.push(category);
    }

    let sub_category = clean_name_part(&record.sub_category);
    if !sub_category.is_empty() {
        parts.push(sub_category);
    }

    format!("{}{}", parts.join("_"), dotted_extension(&record.original_name))
}

/// Assign `new_name` to every record. Later records whose base name was
/// already taken get `_01`, `_02`, ... in input order.
pub fn assign_names(records: &mut [AudioRecord], pack_name: &str) {
    let mut seen: HashMap<String, usize> = HashMap::new();

    for record in records.iter_mut() {
        let name = generate_ue5_name(record, pack_name);
        let ext = dotted_extension(&name);
        let base = name.strip_suffix(ext.as_str()).unwrap_or(&name).to_string();

        let count = seen.entry(base.clone()).or_insert(0);
        record.new_name = Some(if *count > 0 {
            format!("{}_{:02}{}", base, count, ext)
        } else {
            name
        });
        *count += 1;
    }
}

fn dotted_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}
