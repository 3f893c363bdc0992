//! Property-list loading for leak-stats.
//!
//! Lists one directory of exported traces and decodes every visible regular
//! file into a [`PropertyFile`].

use std::path::Path;

use leak_core::error::{LeakStatsError, Result};
use leak_core::models::PropertyFile;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every decodable property list directly inside `dir`, sorted by
/// filename.
///
/// Hidden entries, sub-directories and files that are not property lists with
/// a dictionary root are skipped.  Failing to list `dir` itself (missing, not
/// a directory, permission denied) is fatal and returned as
/// [`LeakStatsError::DirectoryRead`].
pub fn load_property_files(dir: &Path) -> Result<Vec<PropertyFile>> {
    let mut files: Vec<PropertyFile> = Vec::new();
    let mut skipped = 0usize;

    let walker = WalkDir::new(dir)
        .follow_links(true)
        .max_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                return Err(directory_error(dir, source));
            }
            Err(e) => {
                debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                skipped += 1;
                continue;
            }
        };

        if entry.depth() == 0 {
            if !entry.file_type().is_dir() {
                return Err(directory_error(
                    dir,
                    std::io::Error::other("not a directory"),
                ));
            }
            continue;
        }

        match read_property_file(&entry) {
            Some(file) => files.push(file),
            None => skipped += 1,
        }
    }

    files.sort_by(|a, b| a.filename.cmp(&b.filename));

    debug!(
        "Loaded {} property lists from {} ({} skipped)",
        files.len(),
        dir.display(),
        skipped
    );

    Ok(files)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn directory_error(dir: &Path, source: std::io::Error) -> LeakStatsError {
    LeakStatsError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    }
}

/// Decode a single directory entry, returning `None` when it is not a regular
/// file holding a dictionary-rooted property list.
fn read_property_file(entry: &DirEntry) -> Option<PropertyFile> {
    if !entry.file_type().is_file() {
        debug!("Skipping non-file entry {}", entry.path().display());
        return None;
    }

    let Some(filename) = entry.file_name().to_str() else {
        debug!("Skipping non UTF-8 filename {}", entry.path().display());
        return None;
    };

    let value = match plist::Value::from_file(entry.path()) {
        Ok(value) => value,
        Err(e) => {
            debug!(
                "Failed to parse property list {}: {}",
                entry.path().display(),
                e
            );
            return None;
        }
    };

    let Some(dict) = value.into_dictionary() else {
        debug!(
            "Property list {} has no dictionary root",
            entry.path().display()
        );
        return None;
    };

    Some(PropertyFile {
        filename: filename.to_string(),
        dict,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use plist::{Dictionary, Value};
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_plist(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut dict = Dictionary::new();
        dict.insert("source".to_string(), Value::from(name));
        Value::Dictionary(dict).to_file_xml(&path).unwrap();
        path
    }

    fn names(files: &[PropertyFile]) -> Vec<&str> {
        files.iter().map(|f| f.filename.as_str()).collect()
    }

    // ── load_property_files ───────────────────────────────────────────────────

    #[test]
    fn test_load_sorted_by_filename() {
        let dir = TempDir::new().unwrap();
        write_plist(dir.path(), "c-20190101120000-trace");
        write_plist(dir.path(), "a-20190101120000-trace");
        write_plist(dir.path(), "b-20190101120000-trace");

        let files = load_property_files(dir.path()).unwrap();
        assert_eq!(
            names(&files),
            vec![
                "a-20190101120000-trace",
                "b-20190101120000-trace",
                "c-20190101120000-trace"
            ]
        );
        assert_eq!(
            files[0].dict.get("source").and_then(Value::as_string),
            Some("a-20190101120000-trace")
        );
    }

    #[test]
    fn test_load_skips_hidden_files() {
        let dir = TempDir::new().unwrap();
        write_plist(dir.path(), ".hidden.plist");
        write_plist(dir.path(), "visible.plist");

        let files = load_property_files(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["visible.plist"]);
    }

    #[test]
    fn test_load_skips_undecodable_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a property list").unwrap();
        write_plist(dir.path(), "good.plist");

        let files = load_property_files(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["good.plist"]);
    }

    #[test]
    fn test_load_skips_non_dictionary_root() {
        let dir = TempDir::new().unwrap();
        Value::Array(vec![Value::from(1_i64)])
            .to_file_xml(dir.path().join("array.plist"))
            .unwrap();

        let files = load_property_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_load_reads_binary_plists() {
        let dir = TempDir::new().unwrap();
        let mut dict = Dictionary::new();
        dict.insert("format".to_string(), Value::from("binary"));
        Value::Dictionary(dict)
            .to_file_binary(dir.path().join("binary.plist"))
            .unwrap();

        let files = load_property_files(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["binary.plist"]);
    }

    #[test]
    fn test_load_does_not_descend() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir_all(&sub).unwrap();
        write_plist(&sub, "inner.plist");
        write_plist(dir.path(), "outer.plist");

        let files = load_property_files(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["outer.plist"]);
    }

    #[test]
    fn test_load_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = load_property_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_load_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = load_property_files(&missing).unwrap_err();
        match err {
            LeakStatsError::DirectoryRead { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_file_instead_of_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let file = write_plist(dir.path(), "single.plist");

        let err = load_property_files(&file).unwrap_err();
        assert!(matches!(err, LeakStatsError::DirectoryRead { .. }));
    }
}
