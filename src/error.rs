//! Error types for table loading and field access

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading a [`Table`](crate::Table) or reading from it
#[derive(Debug, Error)]
pub enum TableError {
    /// A row's field count differs from the column count set by the first row
    #[error("Ragged row at line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        /// 1-based line number in the source
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The source could not be opened or read
    #[error("Source unavailable{}: {source}", display_path(.path))]
    SourceUnavailable {
        /// Path of the source, when it was a file
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// Separator byte is not ASCII
    #[error("Invalid separator {0:#04x}: must be an ASCII byte")]
    InvalidSeparator(u8),

    /// Coordinate outside the table
    #[error("Cell ({row}, {col}) out of range for table of {rows} rows x {cols} columns")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Field text is not a well-formed value of the requested type
    #[error("Cannot convert {value:?} at ({row}, {col}) to {target}")]
    Conversion {
        row: usize,
        col: usize,
        value: String,
        target: &'static str,
    },

    /// Field text is well-formed but does not fit the requested type
    #[error("Value {value:?} at ({row}, {col}) is out of range for {target}")]
    ValueOutOfRange {
        row: usize,
        col: usize,
        value: String,
        target: &'static str,
    },
}

/// Discriminant of a [`TableError`], for branching on the cause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RaggedRow,
    SourceUnavailable,
    InvalidSeparator,
    OutOfRange,
    Conversion,
    ValueOutOfRange,
}

impl TableError {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TableError::RaggedRow { .. } => ErrorKind::RaggedRow,
            TableError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            TableError::InvalidSeparator(_) => ErrorKind::InvalidSeparator,
            TableError::OutOfRange { .. } => ErrorKind::OutOfRange,
            TableError::Conversion { .. } => ErrorKind::Conversion,
            TableError::ValueOutOfRange { .. } => ErrorKind::ValueOutOfRange,
        }
    }

    /// True for errors raised while loading, after which the table is empty
    pub fn is_load_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::RaggedRow | ErrorKind::SourceUnavailable
        )
    }

    pub(crate) fn unavailable(path: Option<PathBuf>, source: io::Error) -> Self {
        TableError::SourceUnavailable { path, source }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::RaggedRow => "ragged row",
            ErrorKind::SourceUnavailable => "source unavailable",
            ErrorKind::InvalidSeparator => "invalid separator",
            ErrorKind::OutOfRange => "out of range",
            ErrorKind::Conversion => "conversion error",
            ErrorKind::ValueOutOfRange => "value out of range",
        };
        f.write_str(name)
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" ({})", p.display()),
        None => String::new(),
    }
}

/// Result type for table operations
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_load_classification() {
        let err = TableError::RaggedRow {
            line: 3,
            expected: 2,
            found: 3,
        };
        assert_eq!(err.kind(), ErrorKind::RaggedRow);
        assert!(err.is_load_error());

        let err = TableError::OutOfRange {
            row: 0,
            col: 0,
            rows: 0,
            cols: 0,
        };
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(!err.is_load_error());

        let err = TableError::InvalidSeparator(0xC3);
        assert_eq!(err.kind(), ErrorKind::InvalidSeparator);
        assert_eq!(err.to_string(), "Invalid separator 0xc3: must be an ASCII byte");
    }

    #[test]
    fn test_display_includes_path() {
        let err = TableError::unavailable(
            Some(PathBuf::from("missing.csv")),
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("missing.csv"));
        assert!(msg.contains("not found"));

        let err = TableError::unavailable(None, io::Error::other("broken pipe"));
        assert_eq!(err.to_string(), "Source unavailable: broken pipe");
    }
}
