//! Row type shared by the loader and the accessors

use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One non-blank source line split into trimmed fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    /// Create a row from its fields
    pub fn new(fields: Vec<String>) -> Self {
        Row { fields }
    }

    /// Get field at column index
    pub fn get(&self, col: usize) -> Option<&str> {
        self.fields.get(col).map(String::as_str)
    }

    /// Get number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if row has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over field text
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Borrow the fields
    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }

    /// Take ownership of the fields
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl Index<usize> for Row {
    type Output = str;

    fn index(&self, col: usize) -> &str {
        &self.fields[col]
    }
}

impl From<Vec<String>> for Row {
    fn from(fields: Vec<String>) -> Self {
        Row::new(fields)
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_access() {
        let row = Row::new(vec!["a".to_string(), String::new()]);
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
        assert_eq!(row.get(0), Some("a"));
        assert_eq!(row.get(1), Some(""));
        assert_eq!(row.get(2), None);
        assert_eq!(&row[0], "a");
        assert_eq!(row.iter().collect::<Vec<_>>(), vec!["a", ""]);
    }
}
