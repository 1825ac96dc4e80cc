//! Deriving Rust module paths from source file locations

use std::path::{Component, Path};

const MODULE_ROOT_FILES: &[&str] = &["lib", "main", "mod"];

/// Module path of a source file relative to the project root.
///
/// `crates/http-client/src/tracing/spans.rs` becomes
/// `http_client::tracing::spans`; a `src/` directory at the project root
/// maps to `crate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    pub fn from_relative_path(path: &Path) -> Self {
        let components: Vec<String> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let mut segments = Vec::new();
        let module_parts = match components.iter().rposition(|c| c == "src") {
            Some(0) => {
                segments.push("crate".to_string());
                &components[1..]
            }
            Some(src) => {
                segments.push(components[src - 1].clone());
                &components[src + 1..]
            }
            None => &components[..],
        };

        if let Some((file, dirs)) = module_parts.split_last() {
            segments.extend(dirs.iter().cloned());
            let stem = file.strip_suffix(".rs").unwrap_or(file);
            if !MODULE_ROOT_FILES.contains(&stem) {
                segments.push(stem.to_string());
            }
        }

        Self {
            segments: segments.iter().map(|s| s.replace('-', "_")).collect(),
        }
    }

    /// Path of an inline `mod` or type nested in this module
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }
}

impl std::fmt::Display for ModulePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("::"))
    }
}
