use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use crate::error::{Result, TrackerError};
use crate::utils::workbook;

use super::types::RosterRow;

const ID_COLUMNS: &[&str] = &["学号", "student_id"];
const NAME_COLUMNS: &[&str] = &["姓名", "name"];
const GRADE_COLUMNS: &[&str] = &["年级", "grade"];
const CLASS_COLUMNS: &[&str] = &["班级", "class_name"];

/// One data row of a roster file, or the reason it could not be decoded
pub type RosterLine = std::result::Result<RosterRow, String>;

/// Column positions of a roster header
#[derive(Debug, Clone, Copy)]
struct RosterColumns {
    student_id: usize,
    name: usize,
    grade: Option<usize>,
    class_name: Option<usize>,
}

impl RosterColumns {
    fn from_header(header: &StringRecord) -> Option<Self> {
        let find = |aliases: &[&str]| {
            header
                .iter()
                .position(|column| aliases.iter().any(|alias| column.trim_start_matches('\u{feff}').trim() == *alias))
        };

        Some(Self {
            student_id: find(ID_COLUMNS)?,
            name: find(NAME_COLUMNS)?,
            grade: find(GRADE_COLUMNS),
            class_name: find(CLASS_COLUMNS),
        })
    }

    fn row(&self, record: &StringRecord) -> RosterRow {
        let field = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("");
        RosterRow::new(
            field(Some(self.student_id)),
            field(Some(self.name)),
            field(self.grade),
            field(self.class_name),
        )
    }
}

/// Read every data row of a roster file. Workbooks (`.xlsx`, `.xls`, ...)
/// use their first sheet; anything else is read as CSV.
///
/// Open, header and IO failures are errors. A row that cannot be decoded
/// comes back as an `Err` line so the caller can skip it.
pub fn read_roster_rows(path: &Path) -> Result<Vec<RosterLine>> {
    let rows = if workbook::is_workbook(path) {
        read_workbook_rows(path)?
    } else {
        read_csv_rows(path)?
    };

    debug!("Read {} roster rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn import_error(path: &Path, reason: impl ToString) -> TrackerError {
    TrackerError::ImportRead {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn header_columns(path: &Path, header: Option<&StringRecord>) -> Result<RosterColumns> {
    let columns = header
        .and_then(RosterColumns::from_header)
        .ok_or_else(|| import_error(path, "header must contain 学号 and 姓名 columns"))?;
    debug!("Roster columns: {:?}", columns);
    Ok(columns)
}

fn read_csv_rows(path: &Path) -> Result<Vec<RosterLine>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| import_error(path, e))?;

    let header = reader.byte_headers().map_err(|e| import_error(path, e))?.clone();
    let header = StringRecord::from_byte_record(header).map_err(|e| import_error(path, e))?;
    let columns = header_columns(path, Some(&header))?;

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|e| import_error(path, e))?;
        let line = StringRecord::from_byte_record(record)
            .map(|record| columns.row(&record))
            .map_err(|e| e.to_string());
        rows.push(line);
    }
    Ok(rows)
}

fn read_workbook_rows(path: &Path) -> Result<Vec<RosterLine>> {
    let records = workbook::read_first_sheet(path).map_err(|e| import_error(path, e))?;
    let mut records = records.iter();
    let columns = header_columns(path, records.next())?;

    Ok(records.map(|record| Ok(columns.row(record))).collect())
}
