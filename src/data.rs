use std::path::PathBuf;
use thiserror::Error;

/// One validated employee row. The loader has already coerced the numeric
/// fields, so anything holding an `Employee` can trust them; the unsigned
/// types keep task and experience counts non-negative by construction.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Employee {
    pub name: String,
    pub position: String,
    pub completed_tasks: u32,
    pub performance: f64,
    pub skills: String,
    pub team: String,
    pub experience_years: u32,
}

/// One line of a finished report: a grouping key and its derived metric.
/// The handler that produced it has already rounded the metric to 2 decimals.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReportRow {
    pub group: String,
    pub metric: f64,
}

/// A finished report: column titles for the printer plus ordered rows.
/// Rows are sorted descending by metric; equal metrics keep the order in
/// which their group first appeared in the input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Report {
    pub columns: [&'static str; 2],
    pub rows: Vec<ReportRow>,
}

/// Why the loader dropped a row. Recoverable by design: the loader records
/// these and moves on to the next row instead of failing the whole file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum SkipReason {
    #[error("column `{column}` has non-integer value `{value}`")]
    BadInteger { column: &'static str, value: String },
    #[error("column `{column}` has non-numeric value `{value}`")]
    BadNumber { column: &'static str, value: String },
    #[error("malformed row: {0}")]
    Malformed(String),
}

/// A dropped row with its position in the file, so callers can report
/// exactly what was ignored instead of digging through the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SkippedRow {
    /// 1-based data row number, header excluded.
    pub line: usize,
    pub reason: SkipReason,
}

/// Fatal pipeline errors. Everything here terminates the run; row-level
/// problems are a `SkipReason`, never an `Error`.
#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum Error {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("file {} is empty or has no readable header", .0.display())]
    EmptyFile(PathBuf),
    #[error("file {} is missing required columns: {}", file.display(), missing.join(", "))]
    MissingColumns { file: PathBuf, missing: Vec<String> },
    #[error("could not decode {} as UTF-8 or Windows-1251", .0.display())]
    Undecodable(PathBuf),
    #[error("unknown report type: {0}")]
    UnknownReport(String),
    #[error("no data to analyze")]
    NoData,
}
