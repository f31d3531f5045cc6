pub mod export_csv;
pub mod export_xlsx;
pub mod table;

pub use export_csv::{save_csv, save_records_json, write_csv};
pub use export_xlsx::{save_xlsx, table_to_xlsx};
pub use table::{Cell, NormalizationError, Table, TableError, DROPPED_FIELDS};
