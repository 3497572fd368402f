pub mod file_collector;
pub mod filename;
pub mod missing;
pub mod scanner;
pub mod types;

// Re-export the main API for easier access
pub use file_collector::{CollectedEntry, FileCollector};
pub use filename::{ExperimentNumber, SubmissionFileName, experiment_number};
pub use missing::{MissingIndex, compute_missing};
pub use scanner::SubmissionScanner;
pub use types::{ExperimentKey, ExperimentRecord, ScanOptions, ScanStats, SubmissionTree};
