//! Source file discovery for per-file tools.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, VerifyError};

/// Collect source files under `dirs`, in order.
///
/// Each directory is walked depth-first with entries sorted by name, so the
/// result is stable between runs. Hidden entries and `target/` are skipped,
/// missing directories contribute nothing, and a file reachable from two
/// roots is listed once.
pub fn discover_sources(dirs: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for dir in dirs {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "Source directory missing, skipping");
            continue;
        }

        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped(e));

        for entry in walker {
            let entry = entry.map_err(|e| VerifyError::Discovery {
                path: dir.clone(),
                message: e.to_string(),
            })?;
            if entry.file_type().is_file()
                && has_extension(entry.path(), extensions)
                && seen.insert(entry.path().to_path_buf())
            {
                files.push(entry.into_path());
            }
        }
    }

    debug!(count = files.len(), "Discovered source files");
    Ok(files)
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && name == "target")
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn rs() -> Vec<String> {
        vec!["rs".to_string()]
    }

    #[test]
    fn test_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "pieces/b.rs");
        touch(root, "pieces/a.rs");
        touch(root, "pieces/ntheory/primes.rs");
        touch(root, "pieces/README.md");
        touch(root, "tests/primes.rs");

        let files = discover_sources(&[root.join("pieces"), root.join("tests")], &rs()).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("pieces/a.rs"),
                PathBuf::from("pieces/b.rs"),
                PathBuf::from("pieces/ntheory/primes.rs"),
                PathBuf::from("tests/primes.rs"),
            ]
        );
    }

    #[test]
    fn test_skips_hidden_and_target() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "pieces/.hidden/x.rs");
        touch(root, "pieces/target/debug/build.rs");
        touch(root, "pieces/lib.rs");

        let files = discover_sources(&[root.join("pieces")], &rs()).unwrap();
        assert_eq!(files, vec![root.join("pieces/lib.rs")]);
    }

    #[test]
    fn test_missing_dir_and_overlap() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "pieces/lib.rs");

        let files = discover_sources(
            &[root.join("pieces"), root.join("pieces"), root.join("nope")],
            &rs(),
        )
        .unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_multiple_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "pieces/a.py");
        touch(root, "pieces/b.pyi");
        touch(root, "pieces/c.rs");

        let exts = vec!["py".to_string(), "pyi".to_string()];
        let files = discover_sources(&[root.join("pieces")], &exts).unwrap();
        assert_eq!(files.len(), 2);
    }
}
