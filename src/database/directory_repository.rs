use std::sync::Arc;

use crate::database::columns;
use crate::database::models::Person;
use crate::error::AppError;
use crate::store::{StoreError, TableStore, cell_matches, cell_text};

/// Read-only lookups against the external directory table.
#[derive(Clone)]
pub struct DirectoryRepository {
    store: Arc<dyn TableStore>,
    table: String,
}

impl DirectoryRepository {
    pub fn new(store: Arc<dyn TableStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Resolve a person by email (exact) or personnel id (loose, text-normalized).
    /// One scan in row order, first match wins; duplicates are not detected.
    pub fn find_person(&self, identifier: &str) -> Result<Option<Person>, AppError> {
        let table = self.store.open_table(&self.table)?;
        let data = table.read_all()?;

        let col = |name: &str| {
            data.column(name).ok_or_else(|| StoreError::MissingColumn {
                table: self.table.clone(),
                column: name.to_string(),
            })
        };
        let email_col = col(columns::EMAIL)?;
        let id_col = col(columns::ID_PERSONNEL)?;
        let last_name_col = col(columns::LAST_NAME)?;
        let first_name_col = col(columns::FIRST_NAME)?;
        let centre_col = col(columns::CENTRE_CODE)?;
        let role_col = col(columns::ROLE)?;

        for row in &data.rows {
            let email = cell_text(&row[email_col]);
            if email == identifier || cell_matches(&row[id_col], identifier) {
                let role = cell_text(&row[role_col])
                    .parse()
                    .map_err(AppError::InvalidData)?;
                return Ok(Some(Person {
                    personnel_id: cell_text(&row[id_col]),
                    last_name: cell_text(&row[last_name_col]),
                    first_name: cell_text(&row[first_name_col]),
                    email,
                    centre_code: cell_text(&row[centre_col]),
                    role,
                }));
            }
        }

        log::debug!("No directory match for identifier {}", identifier);
        Ok(None)
    }
}
