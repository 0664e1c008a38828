use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a backing spreadsheet store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("invalid response: {0}")]
    Parse(String),
}

/// A whole worksheet: the header row followed by data rows.
///
/// Rows are kept exactly as wide as the header row; short rows coming back
/// from the store are padded with empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows.into_iter().map(|row| pad_row(row, width)).collect();
        Self { headers, rows }
    }

    /// Build a table from raw sheet values where the first row is the header.
    pub fn from_values(mut values: Vec<Vec<String>>) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let headers: Vec<String> = values
            .remove(0)
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();
        Self::new(headers, values)
    }

    /// Flatten back to sheet values, header row first.
    pub fn into_values(self) -> Vec<Vec<String>> {
        let mut values = Vec::with_capacity(self.rows.len() + 1);
        values.push(self.headers);
        values.extend(self.rows);
        values
    }

    /// Position of a header, if the sheet has it
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn pad_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    if row.len() < width {
        row.resize(width, String::new());
    }
    row
}

/// Whole-table repository over a worksheet.
///
/// There are no partial updates: callers read everything, build the complete
/// desired end state, and write it back. Concurrent writers race and the last
/// `replace_all` wins.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Read the full table (possibly empty)
    async fn list(&self) -> Result<Table, StoreError>;

    /// Read the full table straight from the backing sheet, bypassing any cache.
    ///
    /// Mutations build their end state from this, so edits made directly in
    /// the sheet are not overwritten with an older snapshot.
    async fn list_fresh(&self) -> Result<Table, StoreError> {
        self.list().await
    }

    /// Overwrite the worksheet with `table`
    async fn replace_all(&self, table: Table) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: ReportStore + ?Sized> ReportStore for Arc<T> {
    async fn list(&self) -> Result<Table, StoreError> {
        (**self).list().await
    }

    async fn list_fresh(&self) -> Result<Table, StoreError> {
        (**self).list_fresh().await
    }

    async fn replace_all(&self, table: Table) -> Result<(), StoreError> {
        (**self).replace_all(table).await
    }
}
