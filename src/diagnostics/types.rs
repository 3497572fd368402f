use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions encountered while importing or scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// File name does not follow `实验<N>_<id>-<name>.<ext>`
    MalformedFilename {
        /// Offending file name
        file_name: String,
    },

    /// File names a student ID that is not on the roster
    UnknownStudent {
        /// ID taken from the file name
        student_id: String,
        /// Name taken from the file name
        name: String,
    },

    /// File name carries a different name than the roster for the same ID
    NameMismatch {
        /// ID taken from the file name
        student_id: String,
        /// Name taken from the file name
        file_name: String,
        /// Name on the roster
        roster_name: String,
    },

    /// Roster already holds this ID; the existing record is kept
    DuplicateStudent {
        /// Duplicated ID
        student_id: String,
        /// Name on the rejected row
        name: String,
    },

    /// Roster row without an ID or a name, or one that could not be decoded
    SkippedRow {
        /// 1-based data row number
        row: usize,
        /// Why the row was dropped
        reason: String,
    },

    /// Directory entry that could not be read during a scan
    UnreadableEntry {
        /// Entry path, when known
        path: Option<PathBuf>,
        /// Underlying cause
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedFilename { file_name } => {
                write!(f, "malformed file name: {}", file_name)
            }
            Diagnostic::UnknownStudent { student_id, name } => {
                write!(f, "student not on roster: {}({})", name, student_id)
            }
            Diagnostic::NameMismatch { student_id, file_name, roster_name } => write!(
                f,
                "student name mismatch: file has {}, roster has {}({})",
                file_name, roster_name, student_id
            ),
            Diagnostic::DuplicateStudent { student_id, name } => {
                write!(f, "duplicate student ignored: {}({})", name, student_id)
            }
            Diagnostic::SkippedRow { row, reason } => {
                write!(f, "roster row {} skipped: {}", row, reason)
            }
            Diagnostic::UnreadableEntry { path: Some(path), reason } => {
                write!(f, "unreadable entry {}: {}", path.display(), reason)
            }
            Diagnostic::UnreadableEntry { path: None, reason } => {
                write!(f, "unreadable entry: {}", reason)
            }
        }
    }
}
