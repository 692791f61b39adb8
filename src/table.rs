//! In-memory table: loading, validation and typed field access

use crate::convert::{FieldError, FromField};
use crate::csv::CsvParser;
use crate::error::{Result, TableError};
use crate::types::Row;
use s_zip::StreamingZipReader;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fully buffered table of separator-delimited text
///
/// Every row has the same number of fields. Loading replaces the whole
/// table; if a load fails the table is left empty.
///
/// # Examples
///
/// ```
/// use csvtable::Table;
///
/// let table: Table = "id, price\n1, 9.5\n2, 12.25\n".parse().unwrap();
/// assert_eq!(table.row_count(), 3);
/// assert_eq!(table.column_count(), 2);
/// assert_eq!(table.get_raw(0, 1).unwrap(), "price");
/// assert_eq!(table.get::<f64>(2, 1).unwrap(), 12.25);
/// ```
///
/// # Reloading
///
/// ```
/// use csvtable::{ErrorKind, Table};
///
/// let mut table = Table::new();
/// table.load_str("a,b\nc,d\n").unwrap();
///
/// let err = table.load_str("a,b\nc\n").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::RaggedRow);
/// assert_eq!(table.row_count(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "TableData", into = "TableData")
)]
pub struct Table {
    rows: Vec<Row>,
    column_count: usize,
    parser: CsvParser,
}

impl Table {
    /// Create an empty table using `,` as separator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with a custom separator
    ///
    /// The separator must be an ASCII byte; lines are split on the
    /// character it encodes.
    pub fn with_separator(separator: u8) -> Self {
        Table {
            parser: CsvParser::new(separator),
            ..Self::default()
        }
    }

    /// Set custom separator (builder pattern)
    ///
    /// Only ASCII bytes are accepted, as for [`Table::with_separator`].
    ///
    /// # Examples
    ///
    /// ```
    /// use csvtable::Table;
    ///
    /// let mut table = Table::new().separator(b';');
    /// table.load_str("a;b\n").unwrap();
    /// assert_eq!(table.column_count(), 2);
    /// ```
    pub fn separator(mut self, separator: u8) -> Self {
        self.parser = CsvParser::new(separator);
        self
    }

    /// Get the separator byte
    pub fn separator_byte(&self) -> u8 {
        self.parser.separator()
    }

    /// Parse a sequence of lines into a new table
    pub fn parse<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        table.load_lines(lines)?;
        Ok(table)
    }

    /// Read a new table from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        table.load_reader(reader)?;
        Ok(table)
    }

    /// Read a new table from a file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut table = Self::new();
        table.load_path(path)?;
        Ok(table)
    }

    /// Replace the contents with the given lines
    pub fn load_lines<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let staged = self.stage(lines.into_iter().map(Ok), None);
        self.commit(staged)
    }

    /// Replace the contents with the lines of an in-memory string
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        self.load_lines(text.lines())
    }

    /// Replace the contents with the lines of a reader
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let staged = self.stage(reader.lines(), None);
        self.commit(staged)
    }

    /// Replace the contents with a file
    ///
    /// # File Extensions
    /// - `.csv.zst`, `.csv.zip`, `.csv.gz` → a ZIP archive (Zstd or Deflate entries);
    ///   the first `.csv` entry is read. A plain gzip stream is not a ZIP
    ///   archive and fails with `SourceUnavailable`.
    /// - anything else → read directly
    ///
    /// A missing or unreadable file is a `SourceUnavailable` error and
    /// leaves the table empty.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let name = path.to_string_lossy();

        let staged = if name.ends_with(".csv.zst")
            || name.ends_with(".csv.zip")
            || name.ends_with(".csv.gz")
        {
            read_archive(path)
                .and_then(|text| self.stage(text.lines().map(Ok), Some(path)))
        } else {
            File::open(path)
                .map_err(|e| TableError::unavailable(Some(path.to_path_buf()), e))
                .and_then(|file| self.stage(BufReader::new(file).lines(), Some(path)))
        };

        self.commit(staged)
    }

    /// Remove all rows and reset the column count
    pub fn clear(&mut self) {
        self.rows.clear();
        self.column_count = 0;
    }

    /// Build rows from lines without touching `self`
    fn stage<I, S>(&self, lines: I, path: Option<&Path>) -> Result<(Vec<Row>, usize)>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        let mut rows = Vec::new();
        let mut column_count = 0;

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.map_err(|e| TableError::unavailable(path.map(Path::to_path_buf), e))?;
            let line = line.as_ref();

            if CsvParser::is_blank(line) {
                trace!(line = index + 1, "skipping blank line");
                continue;
            }

            let fields = self.parser.parse_line(line);

            if rows.is_empty() {
                column_count = fields.len();
            } else if fields.len() != column_count {
                return Err(TableError::RaggedRow {
                    line: index + 1,
                    expected: column_count,
                    found: fields.len(),
                });
            }

            rows.push(Row::new(fields));
        }

        Ok((rows, column_count))
    }

    fn commit(&mut self, staged: Result<(Vec<Row>, usize)>) -> Result<()> {
        match staged {
            Ok((rows, column_count)) => {
                debug!(rows = rows.len(), columns = column_count, "table loaded");
                self.rows = rows;
                self.column_count = column_count;
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "table load failed, clearing");
                self.clear();
                Err(e)
            }
        }
    }

    /// Get number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get number of columns, 0 for an empty table
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by index
    pub fn row(&self, row: usize) -> Result<&Row> {
        self.rows.get(row).ok_or_else(|| self.out_of_range(row, 0))
    }

    /// Iterate over all rows in source order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Get the raw text of a field
    pub fn get_raw(&self, row: usize, col: usize) -> Result<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or_else(|| self.out_of_range(row, col))
    }

    /// Get a field converted to `T`
    ///
    /// # Examples
    ///
    /// ```
    /// use csvtable::{ErrorKind, Table};
    ///
    /// let table: Table = "2147483648, x".parse().unwrap();
    /// assert_eq!(table.get::<i64>(0, 0).unwrap(), 2_147_483_648);
    /// assert_eq!(table.get::<i32>(0, 0).unwrap_err().kind(), ErrorKind::ValueOutOfRange);
    /// assert_eq!(table.get::<u8>(0, 1).unwrap_err().kind(), ErrorKind::Conversion);
    /// assert_eq!(table.get::<char>(0, 1).unwrap(), 'x');
    /// ```
    pub fn get<T: FromField>(&self, row: usize, col: usize) -> Result<T> {
        let text = self.get_raw(row, col)?;
        T::from_field(text).map_err(|kind| {
            let value = text.to_string();
            let target = T::TYPE_NAME;
            match kind {
                FieldError::Malformed => TableError::Conversion {
                    row,
                    col,
                    value,
                    target,
                },
                FieldError::OutOfRange => TableError::ValueOutOfRange {
                    row,
                    col,
                    value,
                    target,
                },
            }
        })
    }

    /// Iterate over the raw text of one column
    pub fn column(&self, col: usize) -> Result<impl Iterator<Item = &str>> {
        if col >= self.column_count {
            return Err(self.out_of_range(0, col));
        }
        Ok(self.rows.iter().map(move |r| &r[col]))
    }

    /// Convert a whole column, stopping at the first field that fails
    pub fn column_as<T: FromField>(&self, col: usize) -> Result<Vec<T>> {
        if col >= self.column_count {
            return Err(self.out_of_range(0, col));
        }
        (0..self.rows.len()).map(|row| self.get(row, col)).collect()
    }

    fn out_of_range(&self, row: usize, col: usize) -> TableError {
        TableError::OutOfRange {
            row,
            col,
            rows: self.rows.len(),
            cols: self.column_count,
        }
    }
}

impl FromStr for Table {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        let mut table = Self::new();
        table.load_str(s)?;
        Ok(table)
    }
}

/// Read the first `.csv` entry of a compressed archive as text
fn read_archive(path: &Path) -> Result<String> {
    let unavailable = |e: io::Error| TableError::unavailable(Some(path.to_path_buf()), e);

    let mut zip = StreamingZipReader::open(path)
        .map_err(|e| unavailable(io::Error::other(format!("Failed to open ZIP: {}", e))))?;

    let entry_name = zip
        .entries()
        .iter()
        .find(|e| e.name.ends_with(".csv"))
        .or_else(|| zip.entries().first())
        .ok_or_else(|| {
            unavailable(io::Error::new(
                io::ErrorKind::NotFound,
                "No CSV entry found in archive",
            ))
        })?
        .name
        .clone();

    let data = zip.read_entry_by_name(&entry_name).map_err(|e| {
        unavailable(io::Error::other(format!("Failed to read ZIP entry: {}", e)))
    })?;

    String::from_utf8(data).map_err(|e| unavailable(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Serialized form of a [`Table`]; validated on the way back in
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct TableData {
    separator: u8,
    rows: Vec<Row>,
}

#[cfg(feature = "serde")]
impl From<Table> for TableData {
    fn from(table: Table) -> Self {
        TableData {
            separator: table.separator_byte(),
            rows: table.rows,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<TableData> for Table {
    type Error = TableError;

    fn try_from(data: TableData) -> Result<Self> {
        if !data.separator.is_ascii() {
            return Err(TableError::InvalidSeparator(data.separator));
        }

        // A loaded row always has at least one field
        let column_count = data.rows.first().map_or(0, Row::len);
        if let Some((index, row)) = data
            .rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.is_empty() || r.len() != column_count)
        {
            return Err(TableError::RaggedRow {
                line: index + 1,
                expected: column_count.max(1),
                found: row.len(),
            });
        }

        Ok(Table {
            rows: data.rows,
            column_count,
            parser: CsvParser::new(data.separator),
        })
    }
}
