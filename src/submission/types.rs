use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Submissions collected for one experiment directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperimentRecord {
    /// Experiment directory name
    pub name: String,

    /// IDs of roster students with at least one matching file
    pub submitted_student_ids: HashSet<String>,
}

impl ExperimentRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            submitted_student_ids: HashSet::new(),
        }
    }

    /// Record a submission; re-adding an ID is a no-op
    pub fn add_submission(&mut self, student_id: &str) -> bool {
        self.submitted_student_ids.insert(student_id.to_string())
    }

    pub fn has_submitted(&self, student_id: &str) -> bool {
        self.submitted_student_ids.contains(student_id)
    }

    pub fn submitted_count(&self) -> usize {
        self.submitted_student_ids.len()
    }

    /// Percentage of `class_size` that submitted; 0 for an empty class
    pub fn submission_rate(&self, class_size: usize) -> f64 {
        if class_size == 0 {
            return 0.0;
        }
        self.submitted_count() as f64 / class_size as f64 * 100.0
    }
}

/// Composite key of an experiment within the scanned tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExperimentKey {
    pub course: String,
    pub class_name: String,
    pub experiment: String,
}

impl ExperimentKey {
    pub fn new(course: &str, class_name: &str, experiment: &str) -> Self {
        Self {
            course: course.to_string(),
            class_name: class_name.to_string(),
            experiment: experiment.to_string(),
        }
    }
}

/// Course -> class -> experiment tree produced by a scan.
///
/// Experiments are keyed by `(course, class, experiment)`; a separate
/// course index keeps classes that hold no experiment directories.
#[derive(Debug, Clone, Default)]
pub struct SubmissionTree {
    courses: BTreeMap<String, BTreeSet<String>>,
    experiments: BTreeMap<ExperimentKey, ExperimentRecord>,
}

impl SubmissionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_course(&mut self, course: &str) {
        self.courses.entry(course.to_string()).or_default();
    }

    pub fn add_class(&mut self, course: &str, class_name: &str) {
        self.courses
            .entry(course.to_string())
            .or_default()
            .insert(class_name.to_string());
    }

    /// Get or create the record for an experiment
    pub fn add_experiment(&mut self, course: &str, class_name: &str, experiment: &str) -> &mut ExperimentRecord {
        self.add_class(course, class_name);
        self.experiments
            .entry(ExperimentKey::new(course, class_name, experiment))
            .or_insert_with(|| ExperimentRecord::new(experiment))
    }

    pub fn experiment(&self, course: &str, class_name: &str, experiment: &str) -> Option<&ExperimentRecord> {
        self.experiments.get(&ExperimentKey::new(course, class_name, experiment))
    }

    /// Experiments recorded under a class, ordered by name
    pub fn experiments(&self, course: &str, class_name: &str) -> Vec<&ExperimentRecord> {
        self.experiments
            .iter()
            .filter(|(key, _)| key.course == course && key.class_name == class_name)
            .map(|(_, record)| record)
            .collect()
    }

    /// Every experiment in key order
    pub fn iter(&self) -> impl Iterator<Item = (&ExperimentKey, &ExperimentRecord)> {
        self.experiments.iter()
    }

    pub fn course_names(&self) -> Vec<String> {
        self.courses.keys().cloned().collect()
    }

    pub fn class_names(&self, course: &str) -> Vec<String> {
        self.courses
            .get(course)
            .map(|classes| classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains_class(&self, course: &str, class_name: &str) -> bool {
        self.courses
            .get(course)
            .is_some_and(|classes| classes.contains(class_name))
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn class_count(&self) -> usize {
        self.courses.values().map(BTreeSet::len).sum()
    }

    pub fn experiment_count(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn clear(&mut self) {
        self.courses.clear();
        self.experiments.clear();
    }
}

/// Configuration options for submission scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Accepted submission file extensions, matched exactly (case-sensitive)
    pub extensions: Vec<String>,

    /// Whether to follow symbolic links while walking the tree
    pub follow_links: bool,

    /// Whether to log every recorded submission
    pub verbose: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: ["doc", "docx", "pdf", "txt"].iter().map(|ext| ext.to_string()).collect(),
            follow_links: true,
            verbose: false,
        }
    }
}

/// Statistics about a scan
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Course directories found
    pub courses: usize,

    /// Class directories found
    pub classes: usize,

    /// Experiment directories found
    pub experiments: usize,

    /// Regular files inside experiment directories
    pub total_files: usize,

    /// Files that produced a submission
    pub recorded: usize,

    /// Files whose name did not match the submission pattern
    pub malformed: usize,

    /// Files naming a student that is not on the roster
    pub unknown_students: usize,

    /// Recorded files whose name disagrees with the roster
    pub name_mismatches: usize,

    /// Non-directory entries above the experiment level, directories
    /// inside experiments, and unreadable entries
    pub skipped_entries: usize,
}
