use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{FIRST_DATA_ROW, StoreError, Table, TableData, TableStore};

type Workbook = BTreeMap<String, TableData>;

/// File-backed table store: one JSON document holding every logical table.
/// Every operation re-reads the file and writes it back whole, so edits made
/// by other processes become visible on the next call and nothing is cached.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Workbook, StoreError> {
        if !self.path.exists() {
            return Ok(Workbook::new());
        }
        let bytes = fs::read(&self.path)?;
        let workbook: Workbook = serde_json::from_slice(&bytes)?;
        // The file is shared and editable out-of-band; a row narrower or
        // wider than its header must fail here, not panic a scan later.
        for (name, table) in &workbook {
            let expected = table.columns.len();
            if let Some(row) = table.rows.iter().find(|row| row.len() != expected) {
                return Err(StoreError::RowWidth {
                    table: name.clone(),
                    expected,
                    got: row.len(),
                });
            }
        }
        Ok(workbook)
    }

    fn save(&self, workbook: &Workbook) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(workbook)?;
        // Write through a sibling temp file so readers never see a torn file.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TableStore for JsonFileStore {
    fn open_table(&self, name: &str) -> Result<Box<dyn Table>, StoreError> {
        let workbook = self.load()?;
        if !workbook.contains_key(name) {
            return Err(StoreError::TableNotFound(name.to_string()));
        }
        Ok(Box::new(FileTable {
            store: JsonFileStore::new(self.path.clone()),
            name: name.to_string(),
        }))
    }

    fn create_table(&self, name: &str, columns: &[&str]) -> Result<(), StoreError> {
        let mut workbook = self.load()?;
        if !workbook.contains_key(name) {
            workbook.insert(
                name.to_string(),
                TableData {
                    columns: columns.iter().map(|c| c.to_string()).collect(),
                    rows: Vec::new(),
                },
            );
            self.save(&workbook)?;
        }
        Ok(())
    }
}

struct FileTable {
    store: JsonFileStore,
    name: String,
}

impl FileTable {
    fn read(&self) -> Result<TableData, StoreError> {
        let workbook = self.store.load()?;
        workbook
            .get(&self.name)
            .cloned()
            .ok_or_else(|| StoreError::TableNotFound(self.name.clone()))
    }

    fn update(
        &self,
        f: impl FnOnce(&mut TableData) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let mut workbook = self.store.load()?;
        let table = workbook
            .get_mut(&self.name)
            .ok_or_else(|| StoreError::TableNotFound(self.name.clone()))?;
        f(table)?;
        self.store.save(&workbook)
    }
}

impl Table for FileTable {
    fn columns(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read()?.columns)
    }

    fn read_all(&self) -> Result<TableData, StoreError> {
        self.read()
    }

    fn append_row(&self, values: Vec<Value>) -> Result<(), StoreError> {
        self.update(|table| {
            if values.len() != table.columns.len() {
                return Err(StoreError::RowWidth {
                    table: self.name.clone(),
                    expected: table.columns.len(),
                    got: values.len(),
                });
            }
            table.rows.push(values);
            Ok(())
        })
    }

    fn set_cell(&self, row: usize, column: &str, value: Value) -> Result<(), StoreError> {
        self.update(|table| {
            let col = table
                .column(column)
                .ok_or_else(|| StoreError::MissingColumn {
                    table: self.name.clone(),
                    column: column.to_string(),
                })?;
            let index = row
                .checked_sub(FIRST_DATA_ROW)
                .filter(|i| *i < table.rows.len())
                .ok_or(StoreError::RowOutOfRange {
                    table: self.name.clone(),
                    row,
                })?;
            table.rows[index][col] = value;
            Ok(())
        })
    }
}
