//! Recursive source tree traversal

use super::filter::PathFilter;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error("Cannot resolve symbolic link {path}: {source}")]
    BrokenLink { path: PathBuf, source: io::Error },
}

/// Walks every file under the filter's root and keeps the matching ones.
///
/// Symlinked files are read through the link; symlinked directories are not
/// descended into. Traversal errors are returned to the caller; a partial scan
/// is never reported as complete.
pub struct SourceTreeWalker<'a> {
    filter: &'a PathFilter,
}

impl<'a> SourceTreeWalker<'a> {
    pub fn new(filter: &'a PathFilter) -> Self {
        Self { filter }
    }

    /// Lazily yields matching file paths in traversal order
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + 'a {
        let filter = self.filter;
        WalkDir::new(filter.root())
            .follow_links(false)
            .into_iter()
            .filter_map(move |entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => return Some(Err(err.into())),
                };
                match is_file(&entry) {
                    Ok(true) => {}
                    Ok(false) => return None,
                    Err(err) => return Some(Err(err)),
                }

                let path = entry.into_path();
                if filter.matches(&path) {
                    debug!(path = %path.display(), "Matched source file");
                    Some(Ok(path))
                } else {
                    trace!(path = %path.display(), "Skipping non-matching file");
                    None
                }
            })
    }
}

fn is_file(entry: &DirEntry) -> Result<bool, ScanError> {
    if !entry.path_is_symlink() {
        return Ok(entry.file_type().is_file());
    }
    fs::metadata(entry.path())
        .map(|target| target.is_file())
        .map_err(|source| ScanError::BrokenLink {
            path: entry.path().to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn collect(filter: &PathFilter) -> Result<Vec<PathBuf>, ScanError> {
        SourceTreeWalker::new(filter).walk().collect()
    }

    fn create_test_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir_all(base.join("app/src/http")).unwrap();
        fs::write(base.join("app/src/lib.rs"), "pub mod http;").unwrap();
        fs::write(base.join("app/src/http/spans.rs"), "pub struct Spans;").unwrap();
        fs::write(base.join("app/README.md"), "# App").unwrap();
        fs::create_dir_all(base.join("app/src/empty")).unwrap();

        dir
    }

    #[test]
    fn test_yields_matching_files_only() {
        let dir = create_test_tree();
        let filter = PathFilter::new(dir.path(), r"\.rs$").unwrap();

        let mut files = collect(&filter).unwrap();
        files.sort();

        assert_eq!(
            files,
            vec![
                dir.path().join("app/src/http/spans.rs"),
                dir.path().join("app/src/lib.rs"),
            ]
        );
    }

    #[test]
    fn test_directories_are_never_yielded() {
        let dir = create_test_tree();
        let filter = PathFilter::new(dir.path(), ".*").unwrap();

        let files = collect(&filter).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.is_file()));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let filter = PathFilter::new("/nonexistent/telemetry-docs/root", ".*").unwrap();
        assert!(collect(&filter).is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_unreadable_directory_is_an_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = create_test_tree();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.rs"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores directory permissions
        let readable = fs::read_dir(&locked).is_ok();
        let filter = PathFilter::new(dir.path(), r"\.rs$").unwrap();
        let result = collect(&filter);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            assert!(result.is_err());
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_broken_symlink_is_an_error() {
        let dir = create_test_tree();
        std::os::unix::fs::symlink(
            dir.path().join("app/src/gone.rs"),
            dir.path().join("app/src/dangling.rs"),
        )
        .unwrap();

        let filter = PathFilter::new(dir.path(), r"\.rs$").unwrap();
        let err = collect(&filter).unwrap_err();
        match err {
            ScanError::BrokenLink { path, .. } => assert!(path.ends_with("app/src/dangling.rs")),
            other => panic!("Expected BrokenLink, got {:?}", other),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinked_file_is_yielded() {
        let dir = create_test_tree();
        std::os::unix::fs::symlink(
            dir.path().join("app/src/lib.rs"),
            dir.path().join("app/src/linked.rs"),
        )
        .unwrap();

        let filter = PathFilter::new(dir.path(), r"\.rs$").unwrap();
        let files = collect(&filter).unwrap();
        assert!(files.contains(&dir.path().join("app/src/linked.rs")));
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinked_directory_is_not_descended() {
        let dir = create_test_tree();
        std::os::unix::fs::symlink(dir.path().join("app/src"), dir.path().join("mirror"))
            .unwrap();

        let filter = PathFilter::new(dir.path(), r"\.rs$").unwrap();
        let files = collect(&filter).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| !f.starts_with(dir.path().join("mirror"))));
    }
}
