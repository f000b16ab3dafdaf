pub mod config;
pub mod database;
pub mod error;
pub mod services;
pub mod store;

use std::sync::Arc;

pub use config::Config;
pub use error::AppError;

use database::{DirectoryRepository, EntryRepository};
use services::{ApprovalService, QueryViews};
use store::{JsonFileStore, StoreError, TableStore};

/// Everything a caller (UI, API layer, CLI) needs, wired against one store.
pub struct AppState {
    pub directory: DirectoryRepository,
    pub entries: EntryRepository,
    pub approvals: ApprovalService,
    pub views: QueryViews,
}

impl AppState {
    /// Open the configured store file, ensure both logical tables exist, and
    /// wire the repositories and services over it.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        let store: Arc<dyn TableStore> = Arc::new(JsonFileStore::new(&config.store_path));
        database::init_store(&store, config)?;
        Ok(Self::new(store, config))
    }

    pub fn new(store: Arc<dyn TableStore>, config: &Config) -> Self {
        let directory = DirectoryRepository::new(Arc::clone(&store), &config.directory_table);
        let entries = EntryRepository::new(store, &config.entries_table);
        let approvals = ApprovalService::new(entries.clone());
        let views = QueryViews::new(entries.clone());
        AppState {
            directory,
            entries,
            approvals,
            views,
        }
    }
}
