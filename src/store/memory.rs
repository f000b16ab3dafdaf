use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{FIRST_DATA_ROW, StoreError, Table, TableData, TableStore};

/// In-memory table store. Backs tests and embedded use; the same shared-state
/// semantics as the file store, just without the file.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<HashMap<String, TableData>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableStore for InMemoryStore {
    fn open_table(&self, name: &str) -> Result<Box<dyn Table>, StoreError> {
        let tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        if !tables.contains_key(name) {
            return Err(StoreError::TableNotFound(name.to_string()));
        }
        Ok(Box::new(MemoryTable {
            tables: Arc::clone(&self.tables),
            name: name.to_string(),
        }))
    }

    fn create_table(&self, name: &str, columns: &[&str]) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        tables.entry(name.to_string()).or_insert_with(|| TableData {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        });
        Ok(())
    }
}

struct MemoryTable {
    tables: Arc<Mutex<HashMap<String, TableData>>>,
    name: String,
}

impl MemoryTable {
    fn with_table<T>(
        &self,
        f: impl FnOnce(&mut TableData) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        let table = tables
            .get_mut(&self.name)
            .ok_or_else(|| StoreError::TableNotFound(self.name.clone()))?;
        f(table)
    }
}

impl Table for MemoryTable {
    fn columns(&self) -> Result<Vec<String>, StoreError> {
        self.with_table(|table| Ok(table.columns.clone()))
    }

    fn read_all(&self) -> Result<TableData, StoreError> {
        self.with_table(|table| Ok(table.clone()))
    }

    fn append_row(&self, values: Vec<Value>) -> Result<(), StoreError> {
        self.with_table(|table| {
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
        self.with_table(|table| {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn open_unknown_table_fails() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.open_table("NOPE"),
            Err(StoreError::TableNotFound(_))
        ));
    }

    #[test]
    fn create_table_is_idempotent() {
        let store = InMemoryStore::new();
        store.create_table("T", &["A", "B"]).unwrap();
        let table = store.open_table("T").unwrap();
        table.append_row(vec![json!(1), json!(2)]).unwrap();

        // A second create must not wipe existing rows
        store.create_table("T", &["A", "B"]).unwrap();
        assert_eq!(store.open_table("T").unwrap().read_all().unwrap().rows.len(), 1);
    }

    #[test]
    fn set_cell_addresses_rows_past_the_header() {
        let store = InMemoryStore::new();
        store.create_table("T", &["A", "B"]).unwrap();
        let table = store.open_table("T").unwrap();
        table.append_row(vec![json!("x"), json!("y")]).unwrap();

        table.set_cell(2, "B", json!("z")).unwrap();
        let data = table.read_all().unwrap();
        assert_eq!(data.rows[0][1], json!("z"));

        assert!(matches!(
            table.set_cell(1, "B", json!("header")),
            Err(StoreError::RowOutOfRange { .. })
        ));
        assert!(matches!(
            table.set_cell(3, "B", json!("gone")),
            Err(StoreError::RowOutOfRange { .. })
        ));
    }

    #[test]
    fn keeps_serving_after_a_poisoned_lock() {
        let store = InMemoryStore::new();
        store.create_table("T", &["A"]).unwrap();

        // Poison the mutex: a thread panics while holding it
        let tables = Arc::clone(&store.tables);
        let _ = std::thread::spawn(move || {
            let _guard = tables.lock().unwrap();
            panic!("poisoned on purpose");
        })
        .join();

        let table = store.open_table("T").unwrap();
        table.append_row(vec![json!("still works")]).unwrap();
        assert_eq!(table.read_all().unwrap().rows.len(), 1);
    }

    #[test]
    fn append_rejects_wrong_width() {
        let store = InMemoryStore::new();
        store.create_table("T", &["A", "B"]).unwrap();
        let table = store.open_table("T").unwrap();
        assert!(matches!(
            table.append_row(vec![json!(1)]),
            Err(StoreError::RowWidth { .. })
        ));
    }
}
