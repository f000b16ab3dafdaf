use thiserror::Error;

use crate::database::models::ManagerStatus;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("State conflict: expected {expected}, entry is {actual}")]
    StateConflict {
        expected: ManagerStatus,
        actual: ManagerStatus,
    },

    #[error("Invalid cell data: {0}")]
    InvalidData(String),
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        log::error!("Store error: {}", error);
        AppError::Store(error)
    }
}

impl AppError {
    pub fn invalid_data(message: impl Into<String>) -> Self {
        AppError::InvalidData(message.into())
    }
}
