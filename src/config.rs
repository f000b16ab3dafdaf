use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: String,
    pub directory_table: String,
    pub entries_table: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    /// This is useful for testing where you want to control the environment directly
    pub fn from_env_only() -> Result<Self> {
        Ok(Config {
            store_path: env::var("STORE_PATH").unwrap_or_else(|_| "overtime.json".to_string()),
            directory_table: env::var("DIRECTORY_TABLE").unwrap_or_else(|_| "DIRECTORY".to_string()),
            entries_table: env::var("ENTRIES_TABLE").unwrap_or_else(|_| "ENTRIES".to_string()),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
