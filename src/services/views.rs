use crate::database::EntryRepository;
use crate::database::models::{HistoryItem, PendingItem};
use crate::error::AppError;

/// Read-only projections over the entry repository. No state of its own;
/// every call is one linear scan of the entries table.
#[derive(Clone)]
pub struct QueryViews {
    entries: EntryRepository,
}

impl QueryViews {
    pub fn new(entries: EntryRepository) -> Self {
        Self { entries }
    }

    pub fn history_for(&self, personnel_id: &str) -> Result<Vec<HistoryItem>, AppError> {
        self.entries.history_for(personnel_id)
    }

    pub fn pending_queue(&self, centre: Option<&str>) -> Result<Vec<PendingItem>, AppError> {
        self.entries.pending_queue(centre)
    }
}
