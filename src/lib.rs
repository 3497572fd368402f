pub mod aggregate;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod roster;
pub mod submission;
pub mod utils;

// Re-export main types and functions for easier access
pub use aggregate::{Aggregator, ClassOverview, ExperimentStat, RateSeries, StudentStat};
pub use config::TrackerConfig;
pub use diagnostics::{Diagnostic, DiagnosticLog, DiagnosticsSink, NullSink, SharedSink};
pub use error::{Result, TrackerError};
pub use export::{ExportOptions, SheetCell, SheetRow, StatsExporter};
pub use roster::{ImportSummary, RosterLine, RosterRow, RosterStore, StudentRecord};
pub use submission::{ScanOptions, ScanStats, SubmissionScanner, SubmissionTree};

// Re-export utility functions
pub use utils::{file_utils, workbook};
