use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};

use crate::diagnostics::{Diagnostic, SharedSink};
use crate::error::Result;

use super::import::{self, RosterLine};
use super::types::{ImportSummary, RosterRow, StudentRecord};

/// Imported students, indexed by ID and by class
#[derive(Debug)]
pub struct RosterStore {
    /// Student ID -> record
    students: HashMap<String, StudentRecord>,

    /// Student IDs in insertion order
    order: Vec<String>,

    /// Class name -> student IDs in insertion order
    classes: HashMap<String, Vec<String>>,

    /// Class names in first-seen order
    class_order: Vec<String>,

    sink: SharedSink,
}

impl RosterStore {
    /// Create an empty store reporting to `sink`
    pub fn new(sink: SharedSink) -> Self {
        Self {
            students: HashMap::new(),
            order: Vec::new(),
            classes: HashMap::new(),
            class_order: Vec::new(),
            sink,
        }
    }

    /// Add a student. Returns `false` when the ID is already present; the
    /// existing record is kept and the duplicate is reported.
    pub fn add_student(&mut self, student_id: &str, name: &str, grade: &str, class_name: &str) -> bool {
        if self.students.contains_key(student_id) {
            self.sink.report(&Diagnostic::DuplicateStudent {
                student_id: student_id.to_string(),
                name: name.to_string(),
            });
            return false;
        }

        let record = StudentRecord::new(student_id, name, grade, class_name);
        self.students.insert(student_id.to_string(), record);
        self.order.push(student_id.to_string());

        if !class_name.is_empty() {
            if !self.classes.contains_key(class_name) {
                self.class_order.push(class_name.to_string());
            }
            self.classes
                .entry(class_name.to_string())
                .or_default()
                .push(student_id.to_string());
        }

        true
    }

    /// Look up a student by ID
    pub fn get_student(&self, student_id: &str) -> Option<&StudentRecord> {
        self.students.get(student_id)
    }

    /// Students of a class in insertion order; empty for an unknown class
    pub fn students_by_class(&self, class_name: &str) -> Vec<&StudentRecord> {
        self.classes
            .get(class_name)
            .map(|ids| ids.iter().filter_map(|id| self.students.get(id)).collect())
            .unwrap_or_default()
    }

    /// Number of students in a class
    pub fn class_size(&self, class_name: &str) -> usize {
        self.classes.get(class_name).map_or(0, Vec::len)
    }

    /// All students in insertion order
    pub fn all_students(&self) -> Vec<&StudentRecord> {
        self.order.iter().filter_map(|id| self.students.get(id)).collect()
    }

    /// Class names in first-seen order
    pub fn class_names(&self) -> &[String] {
        &self.class_order
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Remove every student
    pub fn clear(&mut self) {
        self.students.clear();
        self.order.clear();
        self.classes.clear();
        self.class_order.clear();
    }

    /// Import validated rows. Rows with an empty ID or name are skipped;
    /// duplicates keep the first record.
    pub fn import_rows<I>(&mut self, rows: I) -> ImportSummary
    where
        I: IntoIterator<Item = RosterRow>,
    {
        self.import_lines(rows.into_iter().map(Ok))
    }

    /// Import rows read from a file, skipping rows that failed to decode
    fn import_lines<I>(&mut self, lines: I) -> ImportSummary
    where
        I: IntoIterator<Item = RosterLine>,
    {
        let mut summary = ImportSummary::default();

        for (index, line) in lines.into_iter().enumerate() {
            summary.total_rows += 1;

            let row = match line {
                Ok(row) if !row.student_id.is_empty() && !row.name.is_empty() => row,
                other => {
                    let reason = other
                        .err()
                        .unwrap_or_else(|| "missing student ID or name".to_string());
                    self.sink.report(&Diagnostic::SkippedRow { row: index + 1, reason });
                    summary.skipped += 1;
                    continue;
                }
            };

            if self.add_student(&row.student_id, &row.name, &row.grade, &row.class_name) {
                summary.imported += 1;
            } else {
                summary.duplicates += 1;
            }
        }

        debug!(
            "Imported {} of {} roster rows ({} duplicates, {} skipped)",
            summary.imported, summary.total_rows, summary.duplicates, summary.skipped
        );
        summary
    }

    /// Import a roster file (CSV or spreadsheet workbook). Fails only when
    /// the file itself cannot be read; individual bad rows are skipped.
    pub fn import_from_file(&mut self, path: impl AsRef<Path>) -> Result<ImportSummary> {
        let path = path.as_ref();
        info!("Importing roster from {}", path.display());

        let rows = match import::read_roster_rows(path) {
            Ok(rows) => rows,
            Err(e) => {
                self.sink.append(&e.to_string());
                return Err(e);
            }
        };

        let summary = self.import_lines(rows);
        self.sink
            .append(&format!("imported {} students from {}", summary.total_rows, path.display()));
        Ok(summary)
    }

    /// Replace every student's missing list. Students absent from `missing`
    /// end up with an empty list.
    pub fn replace_missing(&mut self, mut missing: HashMap<String, Vec<String>>) {
        for (student_id, record) in self.students.iter_mut() {
            record.missing_experiments = missing.remove(student_id).unwrap_or_default();
        }
    }
}
