// table.rs
use crate::scraper::models::ListingRecord;
use crate::scraper::CrawlError;
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Site bookkeeping fields that never make it into a table.
pub const DROPPED_FIELDS: [&str; 3] = [
    "affichagetype",
    "idtypepublicationsourcecouplage",
    "produitsvisibilite",
];

#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("column '{column}' row {row}: '{value}' is not a number")]
    NotNumeric {
        column: String,
        row: usize,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error(transparent)]
    Crawl(#[from] CrawlError),
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("XLSX error: {0}")]
    Xlsx(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Rendering used by text exports.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

/// Listings laid out as rows over the union of their fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// `nb*` counters, price and area arrive as French-formatted strings.
pub fn is_numeric_column(name: &str) -> bool {
    name.starts_with("nb") || name == "prix" || name == "surface"
}

pub fn is_dropped_field(name: &str) -> bool {
    DROPPED_FIELDS.iter().any(|d| d.eq_ignore_ascii_case(name))
}

impl Table {
    /// Collect every record, then normalize. Columns keep first-seen order.
    pub fn from_records<I>(records: I) -> Result<Self, NormalizationError>
    where
        I: IntoIterator<Item = ListingRecord>,
    {
        let records: Vec<ListingRecord> = records.into_iter().collect();

        let mut seen: IndexSet<&str> = IndexSet::new();
        for record in &records {
            for (key, _) in record.fields() {
                if !is_dropped_field(key) {
                    seen.insert(key.as_str());
                }
            }
        }
        let columns: Vec<String> = seen.into_iter().map(str::to_string).collect();

        let mut rows = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            let mut cells = Vec::with_capacity(columns.len());
            for column in &columns {
                let cell = match record.get(column) {
                    None => Cell::Empty,
                    Some(value) if is_numeric_column(column) => numeric_cell(column, row, value)?,
                    Some(value) => plain_cell(value),
                };
                cells.push(cell);
            }
            rows.push(cells);
        }

        debug!("Table built: {} rows x {} columns", rows.len(), columns.len());
        Ok(Self { columns, rows })
    }

    /// Like `from_records`, for a record stream that may stop on a crawl
    /// error.
    pub fn try_from_results<I>(results: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = Result<ListingRecord, CrawlError>>,
    {
        let records = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_records(records)?)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|cells| cells.get(col))
    }
}

fn numeric_cell(column: &str, row: usize, value: &Value) -> Result<Cell, NormalizationError> {
    let not_numeric = || NormalizationError::NotNumeric {
        column: column.to_string(),
        row,
        value: value.to_string(),
    };

    match value {
        Value::Null => Ok(Cell::Empty),
        Value::Number(n) => n.as_f64().map(Cell::Number).ok_or_else(not_numeric),
        Value::String(s) if s.trim().is_empty() => Ok(Cell::Empty),
        Value::String(s) => s
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map(Cell::Number)
            .map_err(|_| not_numeric()),
        _ => Err(not_numeric()),
    }
}

fn plain_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Empty,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Text(n.to_string())),
        Value::String(s) => Cell::Text(s.clone()),
        nested => Cell::Text(nested.to_string()),
    }
}
