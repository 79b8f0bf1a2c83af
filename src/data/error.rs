use thiserror::Error;

/// Structural problems with a source table. Any of these aborts the load;
/// cell-level problems never end up here.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("table has no header row")]
    EmptyHeader,

    #[error("id column '{0}' not found")]
    MissingIdColumn(String),

    #[error("column '{0}' is not an integer year label")]
    InvalidYearLabel(String),

    #[error("row {row} has {found} cells but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
