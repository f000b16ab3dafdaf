use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::database::columns;
use crate::database::models::{
    DeclarantStatus, EntryColumns, HistoryItem, ManagerStatus, NewEntryInput, OvertimeEntry,
    PendingItem,
};
use crate::error::AppError;
use crate::store::{StoreError, TableData, TableStore, cell_matches, cell_text};

/// An entry together with its physical row position (header = 1, first data
/// row = 2), for cell-level updates.
#[derive(Debug, Clone)]
pub struct LocatedEntry {
    pub physical_row: usize,
    pub entry: OvertimeEntry,
}

/// Creates and scans overtime entries in the entries table. Every call goes
/// straight to the store; visibility of the append is the store's.
#[derive(Clone)]
pub struct EntryRepository {
    store: Arc<dyn TableStore>,
    table: String,
}

impl EntryRepository {
    pub fn new(store: Arc<dyn TableStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Create a new overtime entry: fresh id, declarant auto-validated,
    /// manager status pending. Returns the id; the entry is queryable as soon
    /// as this returns.
    pub fn create(&self, input: NewEntryInput) -> Result<Uuid, AppError> {
        let entry = OvertimeEntry {
            id: Uuid::new_v4(),
            personnel_id: input.personnel_id,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            duration_hours: input.duration_hours,
            declarant_status: DeclarantStatus::ValidatedByDeclarant,
            manager_status: ManagerStatus::Pending,
            manager_email: None,
            reason: input.reason,
            resolution_date: None,
        };

        let table = self.store.open_table(&self.table)?;
        let header = table.columns()?;

        // Lay the cells out in the live header's order, whatever it is.
        let mut cells = entry.to_cells();
        let mut row: Vec<Value> = Vec::with_capacity(header.len());
        for name in &header {
            let position = cells
                .iter()
                .position(|(col, _)| *col == name.as_str())
                .ok_or_else(|| StoreError::MissingColumn {
                    table: self.table.clone(),
                    column: name.clone(),
                })?;
            row.push(cells.swap_remove(position).1);
        }
        table.append_row(row)?;

        log::debug!("Created entry {} for {}", entry.id, entry.personnel_id);
        Ok(entry.id)
    }

    /// Personal history: every entry owned by `personnel_id` (loose match),
    /// in table row order, oldest append first.
    pub fn history_for(&self, personnel_id: &str) -> Result<Vec<HistoryItem>, AppError> {
        let data = self.read_table()?;
        let cols = EntryColumns::resolve(&self.table, &data)?;

        let mut history = Vec::new();
        for row in &data.rows {
            if cell_matches(&row[cols.personnel_id], personnel_id) {
                let entry = OvertimeEntry::from_row(&cols, row)?;
                history.push(HistoryItem {
                    id: entry.id,
                    date: entry.date,
                    duration_hours: entry.duration_hours,
                    manager_status: entry.manager_status,
                    reason: entry.reason,
                });
            }
        }
        Ok(history)
    }

    /// All entries still awaiting a manager decision. The centre filter is
    /// accepted but not applied: every pending entry is returned regardless
    /// of centre, pending a join against the directory table.
    pub fn pending_queue(&self, centre: Option<&str>) -> Result<Vec<PendingItem>, AppError> {
        if let Some(centre) = centre {
            log::debug!("Centre filter {} requested but not applied", centre);
        }

        let data = self.read_table()?;
        let cols = EntryColumns::resolve(&self.table, &data)?;

        let mut pending = Vec::new();
        for row in &data.rows {
            if cell_text(&row[cols.manager_status]) == ManagerStatus::Pending.as_str() {
                let entry = OvertimeEntry::from_row(&cols, row)?;
                pending.push(PendingItem {
                    id: entry.id,
                    personnel_id: entry.personnel_id,
                    date: entry.date,
                    duration_hours: entry.duration_hours,
                    reason: entry.reason,
                });
            }
        }
        Ok(pending)
    }

    /// Locate an entry by id. Strict, case-sensitive equality, unlike the
    /// loose owner matching.
    pub fn locate(&self, entry_id: &Uuid) -> Result<Option<LocatedEntry>, AppError> {
        let data = self.read_table()?;
        let cols = EntryColumns::resolve(&self.table, &data)?;
        let id = entry_id.to_string();

        for (index, row) in data.rows.iter().enumerate() {
            if row[cols.id].as_str() == Some(id.as_str()) {
                return Ok(Some(LocatedEntry {
                    physical_row: TableData::physical_row(index),
                    entry: OvertimeEntry::from_row(&cols, row)?,
                }));
            }
        }
        Ok(None)
    }

    /// Stamp a manager decision onto the row at `physical_row`: three
    /// independent cell writes, not atomic. A failure partway leaves the row
    /// as-is mid-update; there is no repair. Only the approval service calls
    /// this; resolutions go through its transition checks.
    pub(crate) fn write_resolution(
        &self,
        physical_row: usize,
        status: ManagerStatus,
        manager_email: &str,
        resolved_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let table = self.store.open_table(&self.table)?;
        table.set_cell(physical_row, columns::MANAGER_STATUS, json!(status.as_str()))?;
        table.set_cell(physical_row, columns::MANAGER_EMAIL, json!(manager_email))?;
        table.set_cell(
            physical_row,
            columns::VALIDATION_DATE,
            json!(resolved_at.to_rfc3339()),
        )?;
        Ok(())
    }

    fn read_table(&self) -> Result<TableData, AppError> {
        Ok(self.store.open_table(&self.table)?.read_all()?)
    }
}
