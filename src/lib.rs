//! # csvtable
//!
//! A small loader for separator-delimited text. The whole input is buffered
//! into a [`Table`] whose rows all share one column count; fields are
//! converted to numbers or characters on demand.
//!
//! ## Quick Start
//!
//! ```
//! use csvtable::{ErrorKind, Table};
//!
//! let table: Table = "name, qty\nbolt, 40\nnut, 300\n".parse().unwrap();
//!
//! assert_eq!(table.row_count(), 3);
//! assert_eq!(table.get::<u16>(2, 1).unwrap(), 300);
//!
//! let err = table.get::<u8>(2, 1).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::ValueOutOfRange);
//! ```
//!
//! ## Format
//!
//! - one row per non-blank line, blank and whitespace-only lines are skipped
//! - fields split on a single separator byte (default `,`) and trimmed
//! - no quoting or escaping, no header handling
//! - every row must have the same number of fields, otherwise loading fails
//!   and the table is left empty

pub mod convert;
pub mod csv;
pub mod error;
pub mod table;
pub mod types;

pub use convert::{FieldError, FromField};
pub use error::{ErrorKind, Result, TableError};
pub use table::Table;
pub use types::Row;
