use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use super::macros::string_enum;
use crate::database::columns;
use crate::error::AppError;
use crate::store::{StoreError, TableData, cell_text};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// One declared overtime period, the unit of approval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeEntry {
    pub id: Uuid,
    pub personnel_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Elapsed duration in hours, computed by the caller at submission.
    pub duration_hours: f64,
    pub declarant_status: DeclarantStatus,
    pub manager_status: ManagerStatus,
    pub manager_email: Option<String>,
    pub reason: String,
    pub resolution_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntryInput {
    pub personnel_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_hours: f64,
    pub reason: String,
}

/// Personal-history projection of an entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: Uuid,
    pub date: NaiveDate,
    pub duration_hours: f64,
    pub manager_status: ManagerStatus,
    pub reason: String,
}

/// Manager-queue projection of a pending entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingItem {
    pub id: Uuid,
    pub personnel_id: String,
    pub date: NaiveDate,
    pub duration_hours: f64,
    pub reason: String,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    pub enum DeclarantStatus {
        ValidatedByDeclarant => "VALIDATED_BY_DECLARANT",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    pub enum ManagerStatus {
        Pending => "PENDING",
        Approved => "APPROVED",
        Rejected => "REJECTED",
    }
}

impl ManagerStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ManagerStatus::Pending)
    }
}

/// Column indices of the entries table, resolved once per read against the
/// header row. Column order in the table definition is not stable, so nothing
/// downstream may assume a position.
#[derive(Debug, Clone, Copy)]
pub struct EntryColumns {
    pub id: usize,
    pub personnel_id: usize,
    pub date: usize,
    pub start_time: usize,
    pub end_time: usize,
    pub duration: usize,
    pub declarant_status: usize,
    pub manager_status: usize,
    pub manager_email: usize,
    pub reason: usize,
    pub validation_date: usize,
}

impl EntryColumns {
    pub fn resolve(table: &str, data: &TableData) -> Result<Self, StoreError> {
        let col = |name: &str| {
            data.column(name).ok_or_else(|| StoreError::MissingColumn {
                table: table.to_string(),
                column: name.to_string(),
            })
        };
        Ok(Self {
            id: col(columns::ID_ENTRY)?,
            personnel_id: col(columns::PERSONNEL_ID)?,
            date: col(columns::ENTRY_DATE)?,
            start_time: col(columns::ACTUAL_START_TIME)?,
            end_time: col(columns::ACTUAL_END_TIME)?,
            duration: col(columns::COMPUTED_DURATION)?,
            declarant_status: col(columns::DECLARANT_STATUS)?,
            manager_status: col(columns::MANAGER_STATUS)?,
            manager_email: col(columns::MANAGER_EMAIL)?,
            reason: col(columns::REASON)?,
            validation_date: col(columns::VALIDATION_DATE)?,
        })
    }
}

impl OvertimeEntry {
    /// Decode one data row. Rows written by this crate always decode; a row
    /// edited out-of-band into an unparseable shape surfaces as `InvalidData`.
    pub fn from_row(cols: &EntryColumns, row: &[Value]) -> Result<Self, AppError> {
        let text = |index: usize| cell_text(&row[index]);

        let id = Uuid::parse_str(&text(cols.id))
            .map_err(|e| AppError::invalid_data(format!("entry id: {e}")))?;
        let date = NaiveDate::parse_from_str(&text(cols.date), DATE_FORMAT)
            .map_err(|e| AppError::invalid_data(format!("entry date: {e}")))?;
        let start_time = NaiveTime::parse_from_str(&text(cols.start_time), TIME_FORMAT)
            .map_err(|e| AppError::invalid_data(format!("start time: {e}")))?;
        let end_time = NaiveTime::parse_from_str(&text(cols.end_time), TIME_FORMAT)
            .map_err(|e| AppError::invalid_data(format!("end time: {e}")))?;
        let duration_hours = parse_duration(&row[cols.duration])?;
        let declarant_status = text(cols.declarant_status)
            .parse()
            .map_err(AppError::InvalidData)?;
        let manager_status = text(cols.manager_status)
            .parse()
            .map_err(AppError::InvalidData)?;
        let manager_email = Some(text(cols.manager_email)).filter(|s| !s.is_empty());
        let resolution_date = match text(cols.validation_date) {
            s if s.is_empty() => None,
            s => Some(
                DateTime::parse_from_rfc3339(&s)
                    .map_err(|e| AppError::invalid_data(format!("validation date: {e}")))?
                    .with_timezone(&Utc),
            ),
        };

        Ok(Self {
            id,
            personnel_id: text(cols.personnel_id),
            date,
            start_time,
            end_time,
            duration_hours,
            declarant_status,
            manager_status,
            manager_email,
            reason: text(cols.reason),
            resolution_date,
        })
    }

    /// Encode as (column name, cell) pairs; the repository lays them out in
    /// whatever order the live header dictates.
    pub fn to_cells(&self) -> Vec<(&'static str, Value)> {
        vec![
            (columns::ID_ENTRY, json!(self.id.to_string())),
            (columns::PERSONNEL_ID, json!(self.personnel_id)),
            (columns::ENTRY_DATE, json!(self.date.format(DATE_FORMAT).to_string())),
            (
                columns::ACTUAL_START_TIME,
                json!(self.start_time.format(TIME_FORMAT).to_string()),
            ),
            (
                columns::ACTUAL_END_TIME,
                json!(self.end_time.format(TIME_FORMAT).to_string()),
            ),
            (columns::COMPUTED_DURATION, json!(self.duration_hours)),
            (columns::DECLARANT_STATUS, json!(self.declarant_status.as_str())),
            (columns::MANAGER_STATUS, json!(self.manager_status.as_str())),
            (
                columns::MANAGER_EMAIL,
                json!(self.manager_email.clone().unwrap_or_default()),
            ),
            (columns::REASON, json!(self.reason)),
            (
                columns::VALIDATION_DATE,
                json!(
                    self.resolution_date
                        .map(|d| d.to_rfc3339())
                        .unwrap_or_default()
                ),
            ),
        ]
    }
}

fn parse_duration(value: &Value) -> Result<f64, AppError> {
    if let Some(n) = value.as_f64() {
        return Ok(n);
    }
    cell_text(value)
        .parse()
        .map_err(|e| AppError::invalid_data(format!("duration: {e}")))
}
