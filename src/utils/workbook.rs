use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::StringRecord;
use log::debug;

/// Extensions opened as spreadsheet workbooks instead of delimited text
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether `path` names a spreadsheet workbook
pub fn is_workbook(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

/// Cell as text. Whole numbers lose the `.0` spreadsheets add to numeric IDs.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => format!("{:.0}", value),
        other => other.to_string().trim().to_string(),
    }
}

/// Rows of the first worksheet as text records, blank rows dropped.
/// A workbook without sheets yields no rows.
pub fn read_first_sheet(path: impl AsRef<Path>) -> Result<Vec<StringRecord>, calamine::Error> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(Vec::new()),
    };

    let records: Vec<StringRecord> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .map(StringRecord::from)
        .collect();

    debug!("Read {} sheet rows from {}", records.len(), path.display());
    Ok(records)
}
