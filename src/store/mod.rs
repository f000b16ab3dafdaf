use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

/// Physical position of the first data row. Position 1 is the header row.
pub const FIRST_DATA_ROW: usize = 2;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("no column named {column} in table {table}")]
    MissingColumn { table: String, column: String },

    #[error("row {row} out of range in table {table}")]
    RowOutOfRange { table: String, row: usize },

    #[error("row has {got} values, table {table} has {expected} columns")]
    RowWidth {
        table: String,
        expected: usize,
        got: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt store file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A full snapshot of one logical table: the header row plus every data row,
/// in physical order. Column lookups resolve against the header captured at
/// read time, never against a remembered position.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl TableData {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.as_str() == name)
    }

    /// Physical 1-based row position for the data row at `index`,
    /// accounting for the header occupying position 1.
    pub fn physical_row(index: usize) -> usize {
        index + FIRST_DATA_ROW
    }
}

/// Opens logical tables by name. Implementations talk to shared external
/// storage on every call; nothing is cached client-side.
pub trait TableStore: Send + Sync {
    fn open_table(&self, name: &str) -> Result<Box<dyn Table>, StoreError>;

    /// Ensure a table exists with the given header. Existing tables are left
    /// untouched, whatever their column order.
    fn create_table(&self, name: &str, columns: &[&str]) -> Result<(), StoreError>;
}

/// One open logical table. Rows are addressed by 1-based physical position
/// (header = 1, first data row = 2) and cells by column name.
pub trait Table {
    fn columns(&self) -> Result<Vec<String>, StoreError>;

    fn read_all(&self) -> Result<TableData, StoreError>;

    fn append_row(&self, values: Vec<Value>) -> Result<(), StoreError>;

    fn set_cell(&self, row: usize, column: &str, value: Value) -> Result<(), StoreError>;
}

/// Renders a cell to text for loose identifier matching: string cells
/// verbatim, null as empty, anything else via its JSON display form. This is
/// the single normalization rule for owner and directory lookups.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Loose equality: both sides normalized to text.
pub fn cell_matches(value: &Value, needle: &str) -> bool {
    cell_text(value) == needle
}
