use crate::scraper::models::ListingRecord;
use crate::spreadsheets::table::{Table, TableError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), TableError> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(table.columns())?;
    for cells in table.rows() {
        out.write_record(cells.iter().map(|c| c.to_text()))?;
    }

    out.flush()?;
    Ok(())
}

pub fn save_csv(table: &Table, path: &Path) -> Result<(), TableError> {
    let file = File::create(path)?;
    write_csv(table, BufWriter::new(file))
}

/// Raw records, before any normalization, as a pretty JSON array.
pub fn save_records_json(records: &[ListingRecord], path: &Path) -> Result<(), TableError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}
