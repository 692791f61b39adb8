//! Load a delimited file and print each cell with its numeric value
//!
//! Usage: cargo run --example read_table -- <path> [separator]

use csvtable::{ErrorKind, Table};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: read_table <path> [separator]")?;
    let separator = args.next().and_then(|s| s.bytes().next()).unwrap_or(b',');

    let mut table = Table::new().separator(separator);
    table.load_path(&path)?;

    println!(
        "{}: {} rows x {} columns",
        path,
        table.row_count(),
        table.column_count()
    );

    for row in 0..table.row_count() {
        for col in 0..table.column_count() {
            let raw = table.get_raw(row, col)?;
            match table.get::<f64>(row, col) {
                Ok(value) => println!("  ({}, {}) {:?} = {}", row, col, raw, value),
                Err(e) if e.kind() == ErrorKind::Conversion => {
                    println!("  ({}, {}) {:?}", row, col, raw)
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
