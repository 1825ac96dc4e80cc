//! Progress handler trait and events

use crate::generator::DocsSummary;
use std::path::PathBuf;
use std::time::Duration;

/// Events emitted while generating documentation
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Generation started
    Started {
        project_root: PathBuf,
        inclusion_pattern: String,
    },

    /// A matched file was parsed
    FileScanned { path: PathBuf, entries: usize },

    /// An entry was dropped because its identifier was already collected
    DuplicateIdentifier {
        identifier: String,
        kept: String,
        dropped: String,
    },

    /// A tag or event name lacks the prefix its entry declares
    PrefixViolation {
        identifier: String,
        key: String,
        prefix: String,
    },

    /// The document is about to be written
    WritingOutput { path: PathBuf },

    /// Counts over all collected entries
    Summary { summary: DocsSummary },

    /// Generation completed successfully
    Completed { entries: usize, total_time: Duration },

    /// Generation failed
    Failed { error: String },
}

/// Trait for handling progress events during generation
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        count: Arc<AtomicUsize>,
    }

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, _event: &ProgressEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_noop_handler() {
        let handler = NoOpHandler;
        handler.on_progress(&ProgressEvent::Started {
            project_root: PathBuf::from("/test"),
            inclusion_pattern: ".*".to_string(),
        });
    }

    #[test]
    fn test_progress_events() {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = CountingHandler {
            count: count.clone(),
        };

        handler.on_progress(&ProgressEvent::Started {
            project_root: PathBuf::from("/test"),
            inclusion_pattern: ".*".to_string(),
        });
        handler.on_progress(&ProgressEvent::FileScanned {
            path: PathBuf::from("/test/src/lib.rs"),
            entries: 2,
        });
        handler.on_progress(&ProgressEvent::Completed {
            entries: 2,
            total_time: Duration::from_millis(5),
        });

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_event_debug() {
        let event = ProgressEvent::FileScanned {
            path: PathBuf::from("a.rs"),
            entries: 1,
        };
        let debug_str = format!("{:?}", event);
        assert!(debug_str.contains("FileScanned"));
        assert!(debug_str.contains("entries: 1"));
    }
}
