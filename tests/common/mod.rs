use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

use overtime_ledger::AppState;
use overtime_ledger::config::Config;
use overtime_ledger::database::{self, models::NewEntryInput};
use overtime_ledger::store::{InMemoryStore, TableStore};

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_config() -> Config {
    Config {
        store_path: "unused-in-memory".to_string(),
        directory_table: "DIRECTORY".to_string(),
        entries_table: "ENTRIES".to_string(),
        environment: "test".to_string(),
    }
}

// Test context wrapper: an in-memory store seeded with one employee (E100)
// and one manager whose personnel id is a numeric cell (200).
pub struct TestContext {
    pub store: Arc<dyn TableStore>,
    pub config: Config,
    pub state: AppState,
}

impl TestContext {
    pub fn new() -> Result<Self> {
        setup_test_env();
        let config = test_config();
        let store: Arc<dyn TableStore> = Arc::new(InMemoryStore::new());
        database::init_store(&store, &config)?;

        let directory = store.open_table(&config.directory_table)?;
        directory.append_row(vec![
            json!("E100"),
            json!("Martin"),
            json!("Alice"),
            json!("alice@example.com"),
            json!("C1"),
            json!("EMPLOYEE"),
        ])?;
        directory.append_row(vec![
            json!(200),
            json!("Durand"),
            json!("Bruno"),
            json!("manager@example.com"),
            json!("C1"),
            json!("MANAGER"),
        ])?;

        let state = AppState::new(Arc::clone(&store), &config);
        Ok(TestContext {
            store,
            config,
            state,
        })
    }
}

pub fn sample_input(personnel_id: &str) -> NewEntryInput {
    NewEntryInput {
        personnel_id: personnel_id.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        duration_hours: 2.0,
        reason: "deadline".to_string(),
    }
}
