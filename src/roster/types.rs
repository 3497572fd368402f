use serde::{Deserialize, Serialize};

/// A student imported from the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique student ID
    pub student_id: String,

    /// Display name
    pub name: String,

    /// Grade (year), may be empty
    pub grade: String,

    /// Class the student belongs to, may be empty
    pub class_name: String,

    /// Experiments of the student's class the student has not submitted.
    /// Replaced wholesale after every scan.
    pub missing_experiments: Vec<String>,
}

impl StudentRecord {
    /// Create a record with an empty missing list
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        grade: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            grade: grade.into(),
            class_name: class_name.into(),
            missing_experiments: Vec::new(),
        }
    }
}

/// One row of a roster table before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterRow {
    pub student_id: String,
    pub name: String,
    pub grade: String,
    pub class_name: String,
}

impl RosterRow {
    /// Build a row, trimming every value
    pub fn new(student_id: &str, name: &str, grade: &str, class_name: &str) -> Self {
        Self {
            student_id: student_id.trim().to_string(),
            name: name.trim().to_string(),
            grade: grade.trim().to_string(),
            class_name: class_name.trim().to_string(),
        }
    }
}

/// Outcome of a roster import
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Data rows read
    pub total_rows: usize,

    /// Students added to the store
    pub imported: usize,

    /// Rows rejected because the ID was already present
    pub duplicates: usize,

    /// Rows without an ID or name
    pub skipped: usize,
}
