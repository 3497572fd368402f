use std::cell::RefCell;

use chrono::Local;
use log::trace;

use super::DiagnosticsSink;

/// Append-only, timestamped message log
///
/// Unbounded; only [`DiagnosticLog::clear`] removes entries.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: RefCell<Vec<String>>,
}

impl DiagnosticLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries in insertion order
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Whether any entry contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.borrow().iter().any(|entry| entry.contains(needle))
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl DiagnosticsSink for DiagnosticLog {
    fn append(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        trace!("{}", message);
        self.entries
            .borrow_mut()
            .push(format!("[{}] {}", timestamp, message));
    }
}
