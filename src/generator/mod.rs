//! Documentation generation pipeline
//!
//! Walks the project root, extracts documented declarations from every
//! matching file, orders and deduplicates them, then renders and writes one
//! document. Any fatal error aborts the run before the document is written.

mod assemble;

pub use assemble::{assemble, write_document, DocsSummary};

use crate::config::{ConfigError, DocsConfig};
use crate::error::DocsError;
use crate::extract::DeclarationExtractor;
use crate::model::{Entry, EntryCollection};
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::scan::{PathFilter, SourceTreeWalker};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_file: PathBuf,
    pub summary: DocsSummary,
}

pub struct DocsGenerator {
    config: DocsConfig,
    progress: Arc<dyn ProgressHandler>,
}

impl DocsGenerator {
    pub fn new(config: DocsConfig, progress: Arc<dyn ProgressHandler>) -> Self {
        Self { config, progress }
    }

    /// Runs the whole pipeline and writes the document
    pub fn generate(&self) -> Result<GenerationReport, DocsError> {
        let result = self.run();
        if let Err(err) = &result {
            self.progress.on_progress(&ProgressEvent::Failed {
                error: err.to_string(),
            });
        }
        result
    }

    fn run(&self) -> Result<GenerationReport, DocsError> {
        let start = Instant::now();
        self.config.validate()?;

        let entries = self.collect()?;
        self.check_prefixes(&entries)?;

        let output_file = self.config.output_file();
        let document = assemble(&entries);
        self.progress.on_progress(&ProgressEvent::WritingOutput {
            path: output_file.clone(),
        });
        write_document(&output_file, &document)?;

        let summary = DocsSummary::from_entries(self.config.kind, &entries);
        self.progress.on_progress(&ProgressEvent::Summary {
            summary: summary.clone(),
        });
        self.progress.on_progress(&ProgressEvent::Completed {
            entries: entries.len(),
            total_time: start.elapsed(),
        });

        Ok(GenerationReport {
            output_file,
            summary,
        })
    }

    /// Scans the project and collects every documented entry without writing anything
    pub fn collect(&self) -> Result<EntryCollection, DocsError> {
        let root = &self.config.project_root;
        let filter = PathFilter::new(root, &self.config.inclusion_pattern)
            .map_err(ConfigError::InvalidPattern)?;
        self.progress.on_progress(&ProgressEvent::Started {
            project_root: root.clone(),
            inclusion_pattern: filter.pattern().to_string(),
        });

        let extractor = DeclarationExtractor::new(self.config.kind);
        let mut entries = EntryCollection::new();

        for path in SourceTreeWalker::new(&filter).walk() {
            let path = path?;
            let found = self.extract_file(&extractor, &path)?;
            self.progress.on_progress(&ProgressEvent::FileScanned {
                path: path.clone(),
                entries: found.len(),
            });
            for entry in found {
                self.insert(&mut entries, entry);
            }
        }

        Ok(entries)
    }

    fn extract_file(
        &self,
        extractor: &DeclarationExtractor,
        path: &Path,
    ) -> Result<Vec<Entry>, DocsError> {
        let bytes = fs::read(path).map_err(|e| DocsError::io(path, e))?;
        let source = match String::from_utf8(bytes) {
            Ok(source) => source,
            Err(_) => {
                debug!(path = %path.display(), "Skipping non UTF-8 file");
                return Ok(Vec::new());
            }
        };

        let relative = path
            .strip_prefix(&self.config.project_root)
            .unwrap_or(path);
        extractor
            .extract(&source, relative)
            .map_err(|source| DocsError::Extract {
                path: path.to_path_buf(),
                source,
            })
    }

    fn insert(&self, entries: &mut EntryCollection, entry: Entry) {
        let kept = entries
            .get(entry.identifier())
            .map(|existing| existing.enclosing_type().to_string());
        match kept {
            Some(kept) => self.progress.on_progress(&ProgressEvent::DuplicateIdentifier {
                identifier: entry.identifier().to_string(),
                kept,
                dropped: entry.enclosing_type().to_string(),
            }),
            None => {
                entries.insert(entry);
            }
        }
    }

    fn check_prefixes(&self, entries: &EntryCollection) -> Result<(), DocsError> {
        for entry in entries {
            let Some(prefix) = entry.prefix() else {
                continue;
            };
            for key in entry.unprefixed_keys() {
                if self.config.strict_prefixes {
                    return Err(DocsError::PrefixViolation {
                        identifier: entry.identifier().to_string(),
                        key: key.name.clone(),
                        prefix: prefix.to_string(),
                    });
                }
                self.progress.on_progress(&ProgressEvent::PrefixViolation {
                    identifier: entry.identifier().to_string(),
                    key: key.name.clone(),
                    prefix: prefix.to_string(),
                });
            }
        }
        Ok(())
    }
}
