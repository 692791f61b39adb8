//! Line tokenizer: splits on a single separator and trims every field

/// Splits one line of delimited text into trimmed fields
///
/// There is no quoting: every separator byte ends a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CsvParser {
    separator: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { separator: b',' }
    }
}

impl CsvParser {
    /// Create a new parser with a custom separator
    ///
    /// The separator must be ASCII: a byte above 0x7F is not a character
    /// on its own in UTF-8 text.
    pub fn new(separator: u8) -> Self {
        debug_assert!(
            separator.is_ascii(),
            "separator must be an ASCII byte, got {:#04x}",
            separator
        );
        Self { separator }
    }

    /// Get the separator byte
    pub fn separator(&self) -> u8 {
        self.separator
    }

    /// True when the line holds nothing but whitespace
    pub fn is_blank(line: &str) -> bool {
        line.trim().is_empty()
    }

    /// Parse a line into fields
    ///
    /// A line with `n` separators always yields `n + 1` fields.
    pub fn parse_line(&self, line: &str) -> Vec<String> {
        line.split(self.separator as char)
            .map(|field| field.trim().to_string())
            .collect()
    }
}
