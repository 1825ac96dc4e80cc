//! Joining rendered entries into the final document

use crate::error::DocsError;
use crate::model::{EntryCollection, InstrumentKind};
use crate::render;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Counts reported after a run; never part of the document itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsSummary {
    pub kind: InstrumentKind,
    pub entries: usize,
    /// Distinct names in the first tag group (span tags, low cardinality meter tags)
    pub primary_keys: usize,
    /// Distinct names in the second tag group (additional span tags, high cardinality meter tags)
    pub secondary_keys: usize,
    pub events: usize,
}

impl DocsSummary {
    pub fn from_entries(kind: InstrumentKind, entries: &EntryCollection) -> Self {
        let mut primary = BTreeSet::new();
        let mut secondary = BTreeSet::new();
        let mut events = BTreeSet::new();

        for entry in entries {
            let [(_, first), (_, second)] = entry.tag_keys().groups();
            primary.extend(first.iter().map(|k| k.name.as_str()));
            secondary.extend(second.iter().map(|k| k.name.as_str()));
            events.extend(entry.events().iter().map(|k| k.name.as_str()));
        }

        Self {
            kind,
            entries: entries.len(),
            primary_keys: primary.len(),
            secondary_keys: secondary.len(),
            events: events.len(),
        }
    }

    /// Labelled key counts in reporting order
    pub fn key_counts(&self) -> Vec<(&'static str, usize)> {
        match self.kind {
            InstrumentKind::Span => vec![
                ("tag keys", self.primary_keys),
                ("additional tag keys", self.secondary_keys),
                ("events", self.events),
            ],
            InstrumentKind::Meter => vec![
                ("low cardinality tags", self.primary_keys),
                ("high cardinality tags", self.secondary_keys),
            ],
        }
    }
}

/// Renders every entry in collection order, each block followed by a blank line
pub fn assemble(entries: &EntryCollection) -> String {
    let mut document = String::new();
    for entry in entries {
        document.push_str(&render::render(entry));
        document.push_str("\n\n");
    }
    document
}

/// Writes `document` to `path`, creating missing parent directories
pub fn write_document(path: &Path, document: &str) -> Result<PathBuf, DocsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| DocsError::io(parent, e))?;
    }
    fs::write(path, document.as_bytes()).map_err(|e| DocsError::io(path, e))?;
    Ok(path.to_path_buf())
}
