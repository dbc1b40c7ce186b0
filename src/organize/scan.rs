//! Input discovery

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::SUPPORTED_EXTENSIONS;

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Every supported audio file under `source`, in walk order sorted by name.
/// `skip_dir` (the output directory, when distinct) is not descended into.
pub fn collect_audio_files(source: &Path, skip_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match skip_dir {
            Some(skip) => !(entry.file_type().is_dir() && entry.path() == skip),
            None => true,
        });

    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to scan directory: {}", source.display()))?;
        if entry.file_type().is_file() && is_supported(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("a/b/gun.WAV")));
        assert!(is_supported(Path::new("x.m4a")));
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("noext")));
    }

    #[test]
    fn test_collect_skips_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::create_dir_all(&out).unwrap();
        fs::write(dir.path().join("a.wav"), b"").unwrap();
        fs::write(dir.path().join("nested/b.mp3"), b"").unwrap();
        fs::write(dir.path().join("readme.md"), b"").unwrap();
        fs::write(out.join("done.wav"), b"").unwrap();

        let files = collect_audio_files(dir.path(), Some(&out)).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.wav", "b.mp3"]);
    }

    #[test]
    fn test_missing_source_is_error() {
        assert!(collect_audio_files(Path::new("/no/such/dir"), None).is_err());
    }
}
