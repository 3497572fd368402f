//! Spreadsheet export of aggregated statistics.
//!
//! Targets ending in `.xlsx` are written as Excel workbooks; every other
//! path gets delimited text (CSV by default).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, info};
use rust_xlsxwriter::Workbook;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::aggregate::{ExperimentStat, StudentStat};
use crate::diagnostics::SharedSink;
use crate::error::{Result, TrackerError};
use crate::utils::{file_utils, workbook};

/// Value of one worksheet cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetCell<'a> {
    Text(&'a str),
    Number(f64),
}

/// Statistics row laid out as worksheet cells
pub trait SheetRow {
    /// Column titles, identical to the serialized field names
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<SheetCell<'_>>;
}

impl SheetRow for StudentStat {
    const HEADERS: &'static [&'static str] =
        &["student_id", "name", "grade", "class_name", "missing_count", "missing_list"];

    fn cells(&self) -> Vec<SheetCell<'_>> {
        vec![
            SheetCell::Text(&self.student_id),
            SheetCell::Text(&self.name),
            SheetCell::Text(&self.grade),
            SheetCell::Text(&self.class_name),
            SheetCell::Number(self.missing_count as f64),
            SheetCell::Text(&self.missing_list),
        ]
    }
}

impl SheetRow for ExperimentStat {
    const HEADERS: &'static [&'static str] = &["experiment_name", "submission_rate", "missing_students"];

    fn cells(&self) -> Vec<SheetCell<'_>> {
        vec![
            SheetCell::Text(&self.experiment_name),
            SheetCell::Number(self.submission_rate),
            SheetCell::Text(&self.missing_students),
        ]
    }
}

fn is_xlsx(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// Configuration options for exports
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Field delimiter, must be a single ASCII character
    pub delimiter: char,

    /// Whether to start files with a UTF-8 byte order mark
    pub write_bom: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            write_bom: true,
        }
    }
}

impl ExportOptions {
    fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() { self.delimiter as u8 } else { b',' }
    }
}

/// Writes statistics tables, one row per record with a header row in
/// field declaration order. The format follows the target extension.
#[derive(Debug)]
pub struct StatsExporter {
    options: ExportOptions,
    sink: SharedSink,
}

impl StatsExporter {
    pub fn new(sink: SharedSink, options: ExportOptions) -> Self {
        Self { options, sink }
    }

    pub fn with_defaults(sink: SharedSink) -> Self {
        Self::new(sink, ExportOptions::default())
    }

    /// Export student statistics. Returns the number of rows written.
    pub fn export_student_stats(&self, stats: &[StudentStat], path: impl AsRef<Path>) -> Result<usize> {
        self.export(stats, path.as_ref(), "student")
    }

    /// Export experiment statistics. Returns the number of rows written.
    pub fn export_experiment_stats(&self, stats: &[ExperimentStat], path: impl AsRef<Path>) -> Result<usize> {
        self.export(stats, path.as_ref(), "experiment")
    }

    /// Read back a student statistics export
    pub fn read_student_stats(&self, path: impl AsRef<Path>) -> Result<Vec<StudentStat>> {
        self.read(path.as_ref())
    }

    /// Read back an experiment statistics export
    pub fn read_experiment_stats(&self, path: impl AsRef<Path>) -> Result<Vec<ExperimentStat>> {
        self.read(path.as_ref())
    }

    fn export<T: Serialize + SheetRow>(&self, rows: &[T], path: &Path, kind: &str) -> Result<usize> {
        if rows.is_empty() {
            let err = TrackerError::EmptyExport;
            self.sink.append(&format!("{} statistics export skipped: {}", kind, err));
            return Err(err);
        }

        match self.write_rows(rows, path) {
            Ok(()) => {
                info!("Exported {} {} rows to {}", rows.len(), kind, path.display());
                Ok(rows.len())
            }
            Err(e) => {
                let err = TrackerError::ExportWrite {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                };
                self.sink.append(&format!("{} statistics export failed: {}", kind, err));
                Err(err)
            }
        }
    }

    fn write_rows<T: Serialize + SheetRow>(&self, rows: &[T], path: &Path) -> Result<()> {
        file_utils::ensure_parent_exists(path)?;
        if is_xlsx(path) {
            return self.write_workbook(rows, path);
        }

        let mut file = File::create(path)?;
        if self.options.write_bom {
            file.write_all(file_utils::UTF8_BOM.as_bytes())?;
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.options.delimiter_byte())
            .from_writer(file);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }

    fn write_workbook<T: SheetRow>(&self, rows: &[T], path: &Path) -> Result<()> {
        let mut book = Workbook::new();
        let sheet = book.add_worksheet();

        for (col, title) in (0u16..).zip(T::HEADERS) {
            sheet.write_string(0, col, *title)?;
        }
        for (row_index, row) in (1u32..).zip(rows) {
            for (col, cell) in (0u16..).zip(row.cells()) {
                match cell {
                    SheetCell::Text(text) => sheet.write_string(row_index, col, text)?,
                    SheetCell::Number(value) => sheet.write_number(row_index, col, value)?,
                };
            }
        }
        book.save(path)?;

        debug!("Wrote {} rows to workbook {}", rows.len(), path.display());
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        if workbook::is_workbook(path) {
            return Self::read_workbook(path);
        }

        let content = file_utils::read_text_without_bom(path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.options.delimiter_byte())
            .from_reader(content.as_bytes());

        let rows = reader.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;
        Ok(rows)
    }

    fn read_workbook<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        let records = workbook::read_first_sheet(path)?;
        let Some((header, body)) = records.split_first() else {
            return Ok(Vec::new());
        };

        let rows = body
            .iter()
            .map(|record: &StringRecord| record.deserialize(Some(header)))
            .collect::<std::result::Result<Vec<T>, _>>()?;
        Ok(rows)
    }
}

/// Render statistics rows as pretty JSON
pub fn to_json<T: Serialize>(rows: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
