use crate::spreadsheets::table::{Cell, Table, TableError};
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub const SHEET_NAME: &str = "Annonces";

/// Render the table as a one-sheet workbook: header row, then one row per
/// listing with numbers written as numbers.
pub fn table_to_xlsx(table: &Table) -> Result<Vec<u8>, TableError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| TableError::Xlsx(format!("Failed to name worksheet: {}", e)))?;

    // Headers
    for (col, header) in table.columns().iter().enumerate() {
        let col = column_number(col)?;
        worksheet
            .write_string(0, col, header)
            .map_err(|e| {
                TableError::Xlsx(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    // Rows
    for (i, cells) in table.rows().iter().enumerate() {
        let r = u32::try_from(i + 1)
            .map_err(|_| TableError::Xlsx(format!("Row {} out of range", i + 1)))?;

        for (col, cell) in cells.iter().enumerate() {
            let c = column_number(col)?;
            let written = match cell {
                Cell::Empty => continue,
                Cell::Number(n) => worksheet.write_number(r, c, *n).map(|_| ()),
                Cell::Bool(b) => worksheet.write_boolean(r, c, *b).map(|_| ()),
                Cell::Text(s) => worksheet.write_string(r, c, s).map(|_| ()),
            };
            written.map_err(|e| {
                TableError::Xlsx(format!(
                    "Failed to write '{}' at row {}: {}",
                    table.columns()[col],
                    r,
                    e
                ))
            })?;
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| TableError::Xlsx(format!("Failed to save workbook: {}", e)))?;

    Ok(buffer)
}

pub fn save_xlsx(table: &Table, path: &Path) -> Result<(), TableError> {
    let buffer = table_to_xlsx(table)?;
    std::fs::write(path, buffer)?;
    Ok(())
}

fn column_number(col: usize) -> Result<u16, TableError> {
    u16::try_from(col).map_err(|_| TableError::Xlsx(format!("Column {} out of range", col)))
}
