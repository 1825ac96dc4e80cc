//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started {
                project_root,
                inclusion_pattern,
            } => {
                info!(
                    root = %project_root.display(),
                    "Inclusion pattern is [{}]", inclusion_pattern
                );
            }
            ProgressEvent::FileScanned { path, entries } => {
                debug!(path = %path.display(), entries, "Scanned file");
            }
            ProgressEvent::DuplicateIdentifier {
                identifier,
                kept,
                dropped,
            } => {
                warn!(
                    identifier = %identifier,
                    kept = %kept,
                    dropped = %dropped,
                    "Duplicate identifier, keeping the first declaration"
                );
            }
            ProgressEvent::PrefixViolation {
                identifier,
                key,
                prefix,
            } => {
                warn!(
                    identifier = %identifier,
                    key = %key,
                    prefix = %prefix,
                    "Key is missing the required prefix"
                );
            }
            ProgressEvent::WritingOutput { path } => {
                info!("Will create files under [{}]", path.display());
            }
            ProgressEvent::Summary { summary } => {
                info!("Summary of sources analysis");
                info!("Found [{}] {}s", summary.entries, summary.kind);
                for (label, count) in summary.key_counts() {
                    info!("Found [{}] {}", count, label);
                }
            }
            ProgressEvent::Completed {
                entries,
                total_time,
            } => {
                info!(
                    entries,
                    total_time_ms = total_time.as_millis(),
                    "Documentation generated"
                );
            }
            ProgressEvent::Failed { error } => {
                warn!(error = %error, "Documentation generation failed");
            }
        }
    }
}
