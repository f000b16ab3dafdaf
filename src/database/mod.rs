use std::sync::Arc;

use crate::config::Config;
use crate::store::{StoreError, TableStore};

pub mod directory_repository;
pub mod entry_repository;
pub mod models;

pub use directory_repository::DirectoryRepository;
pub use entry_repository::EntryRepository;

/// Column names of the two logical tables. Name-addressed on every access;
/// physical order is owned by the store.
pub mod columns {
    // Directory table
    pub const ID_PERSONNEL: &str = "ID_PERSONNEL";
    pub const LAST_NAME: &str = "LAST_NAME";
    pub const FIRST_NAME: &str = "FIRST_NAME";
    pub const EMAIL: &str = "EMAIL";
    pub const CENTRE_CODE: &str = "CENTRE_CODE";
    pub const ROLE: &str = "ROLE";

    // Entries table
    pub const ID_ENTRY: &str = "ID_ENTRY";
    pub const PERSONNEL_ID: &str = "PERSONNEL_ID";
    pub const ENTRY_DATE: &str = "ENTRY_DATE";
    pub const ACTUAL_START_TIME: &str = "ACTUAL_START_TIME";
    pub const ACTUAL_END_TIME: &str = "ACTUAL_END_TIME";
    pub const COMPUTED_DURATION: &str = "COMPUTED_DURATION";
    pub const DECLARANT_STATUS: &str = "DECLARANT_STATUS";
    pub const MANAGER_STATUS: &str = "MANAGER_STATUS";
    pub const MANAGER_EMAIL: &str = "MANAGER_EMAIL";
    pub const REASON: &str = "REASON";
    pub const VALIDATION_DATE: &str = "VALIDATION_DATE";
}

pub const DIRECTORY_COLUMNS: [&str; 6] = [
    columns::ID_PERSONNEL,
    columns::LAST_NAME,
    columns::FIRST_NAME,
    columns::EMAIL,
    columns::CENTRE_CODE,
    columns::ROLE,
];

pub const ENTRY_COLUMNS: [&str; 11] = [
    columns::ID_ENTRY,
    columns::PERSONNEL_ID,
    columns::ENTRY_DATE,
    columns::ACTUAL_START_TIME,
    columns::ACTUAL_END_TIME,
    columns::COMPUTED_DURATION,
    columns::DECLARANT_STATUS,
    columns::MANAGER_STATUS,
    columns::MANAGER_EMAIL,
    columns::REASON,
    columns::VALIDATION_DATE,
];

/// Ensure both logical tables exist. Existing tables keep their rows and
/// whatever column order they already have.
pub fn init_store(store: &Arc<dyn TableStore>, config: &Config) -> Result<(), StoreError> {
    store.create_table(&config.directory_table, &DIRECTORY_COLUMNS)?;
    store.create_table(&config.entries_table, &ENTRY_COLUMNS)?;
    log::info!(
        "Store ready: tables {} and {}",
        config.directory_table,
        config.entries_table
    );
    Ok(())
}
