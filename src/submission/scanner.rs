use std::path::Path;

use log::{debug, info};

use crate::diagnostics::{Diagnostic, SharedSink};
use crate::error::{Result, TrackerError};
use crate::roster::RosterStore;

use super::file_collector::{CollectedEntry, FileCollector};
use super::filename::SubmissionFileName;
use super::missing::compute_missing;
use super::types::{ScanOptions, ScanStats, SubmissionTree};

/// Submission scanner responsible for building the course / class /
/// experiment tree from a directory of uploaded reports
#[derive(Debug)]
pub struct SubmissionScanner {
    /// Configuration options for scanning
    options: ScanOptions,

    /// Walker for the three-level layout
    file_collector: FileCollector,

    /// Tree built by the last scan
    tree: SubmissionTree,

    sink: SharedSink,
}

impl SubmissionScanner {
    /// Create a new scanner with the given options
    pub fn new(sink: SharedSink, options: ScanOptions) -> Self {
        Self {
            file_collector: FileCollector::new(options.follow_links),
            options,
            tree: SubmissionTree::new(),
            sink,
        }
    }

    /// Create a new scanner with default options
    pub fn with_defaults(sink: SharedSink) -> Self {
        Self::new(sink, ScanOptions::default())
    }

    /// Tree built by the last successful scan
    pub fn tree(&self) -> &SubmissionTree {
        &self.tree
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Rebuild the tree from `root` and recompute every student's missing
    /// experiments.
    ///
    /// Fails only when `root` is missing or not a directory; in that case
    /// the tree is left empty and the roster is not touched.
    pub fn scan(&mut self, root: impl AsRef<Path>, roster: &mut RosterStore) -> Result<ScanStats> {
        let root = root.as_ref();
        info!("Scanning directory: {}", root.display());

        self.tree.clear();

        if !root.exists() {
            let err = TrackerError::PathNotFound(root.to_path_buf());
            self.sink.append(&err.to_string());
            return Err(err);
        }
        if !root.is_dir() {
            let err = TrackerError::NotADirectory(root.to_path_buf());
            self.sink.append(&err.to_string());
            return Err(err);
        }

        let mut stats = ScanStats::default();

        for entry in self.file_collector.collect(root) {
            match entry {
                CollectedEntry::Course { course } => {
                    self.tree.add_course(&course);
                }
                CollectedEntry::Class { course, class_name } => {
                    self.tree.add_class(&course, &class_name);
                }
                CollectedEntry::Experiment { course, class_name, experiment } => {
                    self.tree.add_experiment(&course, &class_name, &experiment);
                }
                CollectedEntry::File { course, class_name, experiment, file_name } => {
                    stats.total_files += 1;
                    self.record_file(&course, &class_name, &experiment, &file_name, roster, &mut stats);
                }
                CollectedEntry::Skipped { path } => {
                    debug!("Skipping {}", path.display());
                    stats.skipped_entries += 1;
                }
                CollectedEntry::Unreadable { path, reason } => {
                    self.sink.report(&Diagnostic::UnreadableEntry { path, reason });
                    stats.skipped_entries += 1;
                }
            }
        }

        let missing = compute_missing(roster, &self.tree);
        roster.replace_missing(missing);

        stats.courses = self.tree.course_count();
        stats.classes = self.tree.class_count();
        stats.experiments = self.tree.experiment_count();

        info!(
            "Scan complete: {} courses, {} classes, {} experiments, {} of {} files recorded",
            stats.courses, stats.classes, stats.experiments, stats.recorded, stats.total_files
        );
        Ok(stats)
    }

    fn record_file(
        &mut self,
        course: &str,
        class_name: &str,
        experiment: &str,
        file_name: &str,
        roster: &RosterStore,
        stats: &mut ScanStats,
    ) {
        let Some(parsed) = SubmissionFileName::parse(file_name, &self.options.extensions) else {
            self.sink.report(&Diagnostic::MalformedFilename {
                file_name: file_name.to_string(),
            });
            stats.malformed += 1;
            return;
        };

        let Some(student) = roster.get_student(&parsed.student_id) else {
            self.sink.report(&Diagnostic::UnknownStudent {
                student_id: parsed.student_id,
                name: parsed.student_name,
            });
            stats.unknown_students += 1;
            return;
        };

        // The ID is authoritative; a differing name is only reported
        if student.name != parsed.student_name {
            self.sink.report(&Diagnostic::NameMismatch {
                student_id: parsed.student_id.clone(),
                file_name: parsed.student_name.clone(),
                roster_name: student.name.clone(),
            });
            stats.name_mismatches += 1;
        }

        if self.options.verbose {
            debug!(
                "Recorded {}({}) for {}/{}/{}",
                student.name, parsed.student_id, course, class_name, experiment
            );
        }

        self.tree
            .add_experiment(course, class_name, experiment)
            .add_submission(&parsed.student_id);
        stats.recorded += 1;
    }
}
