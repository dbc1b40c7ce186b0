//! Destination paths and file moves

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use super::naming::clean_name;
use crate::config::OrganizeConfig;
use crate::record::AudioRecord;

/// Folder for records whose category cleans to nothing
pub const UNCATEGORIZED_DIR: &str = "Uncategorized";

/// Where a record lands: `<output>/<Category>/<name>` when organising,
/// otherwise its source-relative directory under `<output>`.
pub fn destination_for(record: &AudioRecord, config: &OrganizeConfig) -> PathBuf {
    let new_name = record
        .new_name
        .clone()
        .unwrap_or_else(|| record.original_name.clone());

    if config.organize {
        let mut dir = clean_name(&record.category);
        if dir.is_empty() {
            dir = UNCATEGORIZED_DIR.to_string();
        }
        return config.output_dir.join(dir).join(new_name);
    }

    let relative_dir = record
        .path
        .strip_prefix(&config.source_dir)
        .ok()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default();
    config.output_dir.join(relative_dir).join(new_name)
}

/// Move every record to its destination. Stops at the first failure.
pub fn apply_moves(records: &[AudioRecord], config: &OrganizeConfig, show_progress: bool) -> Result<usize> {
    let pb = if show_progress {
        ProgressBar::new(records.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) =
        ProgressStyle::default_bar().template("{msg} [{bar:50.cyan/blue}] {pos}/{len} files")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("Moving files");

    let mut moved = 0;
    for record in records {
        let dst = destination_for(record, config);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        if record.path == dst {
            pb.inc(1);
            continue;
        }

        move_file(&record.path, &dst)
            .with_context(|| format!("Failed to move file {}", record.original_name))?;
        moved += 1;
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(moved)
}

/// Rename, falling back to copy + delete when source and destination sit
/// on different filesystems.
pub fn move_file(src: &Path, dst: &Path) -> Result<()> {
    if let Err(e) = fs::rename(src, dst) {
        debug!("rename {} failed ({}), copying instead", src.display(), e);
        fs::copy(src, dst)
            .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
        fs::remove_file(src)
            .with_context(|| format!("Failed to remove {}", src.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn named(path: &str, category: &str, new_name: &str) -> AudioRecord {
        let mut r = AudioRecord::new(path);
        r.category = category.to_string();
        r.new_name = Some(new_name.to_string());
        r
    }

    #[test]
    fn test_destination_organized() {
        let config = OrganizeConfig::new("/src", "Pack");
        let r = named("/src/a/b.wav", "SFX_Voice", "A_Pack_Voice_B.wav");
        assert_eq!(
            destination_for(&r, &config),
            PathBuf::from("/src/Sfx_Voice/A_Pack_Voice_B.wav")
        );
    }

    #[test]
    fn test_destination_empty_category() {
        let config = OrganizeConfig::new("/src", "Pack");
        let r = named("/src/b.wav", "", "A_Pack.wav");
        assert_eq!(
            destination_for(&r, &config),
            PathBuf::from("/src/Uncategorized/A_Pack.wav")
        );
    }

    #[test]
    fn test_destination_mirrors_tree() {
        let mut config = OrganizeConfig::new("/src", "Pack");
        config.organize = false;
        config.output_dir = PathBuf::from("/out");
        let r = named("/src/nested/dir/b.wav", "Ambient", "A_Pack_Ambient_B.wav");
        assert_eq!(
            destination_for(&r, &config),
            PathBuf::from("/out/nested/dir/A_Pack_Ambient_B.wav")
        );
    }

    #[test]
    fn test_apply_moves() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("gun.wav");
        fs::write(&src, b"data").unwrap();

        let config = OrganizeConfig::new(dir.path(), "Pack");
        let records = vec![named(src.to_str().unwrap(), "SFX_Weapon", "A_Pack_Weapon_Gun.wav")];

        assert_eq!(apply_moves(&records, &config, false).unwrap(), 1);
        let dst = dir.path().join("Sfx_Weapon").join("A_Pack_Weapon_Gun.wav");
        assert!(dst.exists());
        assert!(!src.exists());
        assert_eq!(fs::read(dst).unwrap(), b"data");
    }

    #[test]
    fn test_same_path_is_skipped() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("Ambient");
        fs::create_dir_all(&sub).unwrap();
        let src = sub.join("A_Pack_Ambient_Rain.wav");
        fs::write(&src, b"rain").unwrap();

        let config = OrganizeConfig::new(dir.path(), "Pack");
        let records = vec![named(src.to_str().unwrap(), "Ambient", "A_Pack_Ambient_Rain.wav")];

        assert_eq!(apply_moves(&records, &config, false).unwrap(), 0);
        assert!(src.exists());
    }
}
