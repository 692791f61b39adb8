//! CSV line tokenizing

mod parser;

pub use parser::CsvParser;
