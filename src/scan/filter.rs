//! Inclusion pattern matching for candidate source files

use regex::Regex;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Decides which files under a root are handed to the extractor
#[derive(Debug, Clone)]
pub struct PathFilter {
    root: PathBuf,
    pattern: Regex,
}

impl PathFilter {
    /// Compiles `pattern` after translating `/` to the host separator
    pub fn new(root: impl Into<PathBuf>, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&to_native_separators(pattern))?;
        Ok(Self {
            root: root.into(),
            pattern,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Matches against the full path string; relative paths are joined to the root first
    pub fn matches(&self, path: &Path) -> bool {
        let full = if path.is_absolute() || path.starts_with(&self.root) {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        self.pattern.is_match(&full.to_string_lossy())
    }
}

fn to_native_separators(pattern: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        pattern.to_string()
    } else {
        // A bare backslash would be read as a regex escape
        pattern.replace('/', &regex::escape(&MAIN_SEPARATOR.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        rust_sources = { r".*/src/.*\.rs$", "/repo/crates/app/src/spans.rs", true },
        other_extension = { r".*/src/.*\.rs$", "/repo/crates/app/src/spans.txt", false },
        outside_src = { r".*/src/.*\.rs$", "/repo/build.rs", false },
        unanchored_search = { "observation", "/repo/src/http/observation.rs", true },
        directory_segment = { "/instrumentation/", "/repo/src/instrumentation/spans.rs", true },
    )]
    fn test_matches(pattern: &str, path: &str, expected: bool) {
        let filter = PathFilter::new("/repo", pattern).unwrap();
        assert_eq!(filter.matches(Path::new(path)), expected);
    }

    #[test]
    fn test_relative_path_is_joined_to_root() {
        let filter = PathFilter::new("/repo", r"^/repo/src/.*\.rs$").unwrap();
        assert!(filter.matches(Path::new("src/lib.rs")));
        assert!(!filter.matches(Path::new("tests/lib.rs")));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PathFilter::new("/repo", "src/(unclosed").is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_forward_slashes_kept_on_unix() {
        let filter = PathFilter::new("/repo", "a/b").unwrap();
        assert_eq!(filter.pattern(), "a/b");
    }

    #[test]
    #[cfg(windows)]
    fn test_forward_slashes_translated_on_windows() {
        let filter = PathFilter::new(r"C:\repo", "src/.*").unwrap();
        assert_eq!(filter.pattern(), r"src\\.*");
        assert!(filter.matches(Path::new(r"C:\repo\src\lib.rs")));
    }
}
