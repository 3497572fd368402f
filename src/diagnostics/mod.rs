mod journal;
mod types;

use std::fmt;
use std::rc::Rc;

pub use journal::DiagnosticLog;
pub use types::Diagnostic;

/// Destination for diagnostic messages produced while importing, scanning
/// and exporting.
///
/// Components receive a sink at construction instead of reaching for a
/// global logger, so tests can inspect exactly what a single run reported.
pub trait DiagnosticsSink: fmt::Debug {
    /// Append a message to the sink
    fn append(&self, message: &str);

    /// Forward a non-fatal condition to the `log` facade and append it
    fn report(&self, diagnostic: &Diagnostic) {
        log::warn!("{}", diagnostic);
        self.append(&diagnostic.to_string());
    }
}

/// Shared handle to a sink
pub type SharedSink = Rc<dyn DiagnosticsSink>;

/// Sink that drops every message
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn append(&self, _message: &str) {}
}
