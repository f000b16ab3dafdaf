use chrono::Utc;
use uuid::Uuid;

use crate::database::EntryRepository;
use crate::database::models::ManagerStatus;
use crate::error::AppError;

/// Applies manager decisions to entries.
///
/// States: PENDING → APPROVED | REJECTED, both terminal.
#[derive(Clone)]
pub struct ApprovalService {
    entries: EntryRepository,
}

impl ApprovalService {
    pub fn new(entries: EntryRepository) -> Self {
        Self { entries }
    }

    /// Resolve an entry. Returns `Ok(true)` when a matching entry was found
    /// and stamped, `Ok(false)` when no entry has that id (nothing written).
    ///
    /// `expected` guards the write: when `Some`, the entry's current status
    /// must equal it or the call fails with `StateConflict` and writes
    /// nothing. When `None` there is no guard and a prior decision is
    /// silently overwritten.
    ///
    /// A `rejection_reason` is accepted but has no destination column in the
    /// entries table; it is logged and dropped, never persisted.
    pub fn transition(
        &self,
        entry_id: &Uuid,
        new_status: ManagerStatus,
        manager_email: &str,
        rejection_reason: Option<&str>,
        expected: Option<ManagerStatus>,
    ) -> Result<bool, AppError> {
        if !new_status.is_terminal() {
            return Err(AppError::InvalidTransition(format!(
                "target status must be APPROVED or REJECTED, got {new_status}"
            )));
        }

        let Some(located) = self.entries.locate(entry_id)? else {
            return Ok(false);
        };

        if let Some(expected) = expected {
            if located.entry.manager_status != expected {
                return Err(AppError::StateConflict {
                    expected,
                    actual: located.entry.manager_status,
                });
            }
        }

        if new_status == ManagerStatus::Rejected {
            if let Some(reason) = rejection_reason {
                // No rejection-reason column exists; the text does not survive.
                log::warn!(
                    "Dropping rejection reason for entry {}: {:?}",
                    entry_id,
                    reason
                );
            }
        }

        self.entries
            .write_resolution(located.physical_row, new_status, manager_email, Utc::now())?;

        log::info!(
            "Entry {} resolved as {} by {}",
            entry_id,
            new_status,
            manager_email
        );
        Ok(true)
    }
}
