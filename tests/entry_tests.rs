use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use overtime_ledger::database::models::ManagerStatus;

mod common;

#[test]
fn test_create_returns_fresh_unique_ids() {
    // Arrange
    let ctx = common::TestContext::new().unwrap();

    // Act
    let first = ctx.state.entries.create(common::sample_input("E100")).unwrap();
    let second = ctx.state.entries.create(common::sample_input("E100")).unwrap();

    // Assert
    assert_ne!(first, second);
}

#[test]
fn test_created_entry_is_immediately_in_history() {
    // Arrange
    let ctx = common::TestContext::new().unwrap();

    // Act
    let id = ctx.state.entries.create(common::sample_input("E100")).unwrap();
    let history = ctx.state.views.history_for("E100").unwrap();

    // Assert
    assert_eq!(history.len(), 1);
    let item = &history[0];
    assert_eq!(item.id, id);
    assert_eq!(item.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    assert_eq!(item.duration_hours, 2.0);
    assert_eq!(item.manager_status, ManagerStatus::Pending);
    assert_eq!(item.reason, "deadline");
}

#[test]
fn test_created_entry_is_immediately_in_pending_queue() {
    // Arrange
    let ctx = common::TestContext::new().unwrap();

    // Act
    let id = ctx.state.entries.create(common::sample_input("E100")).unwrap();
    let pending = ctx.state.views.pending_queue(None).unwrap();

    // Assert
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, id);
    assert_eq!(pending[0].personnel_id, "E100");
    assert_eq!(pending[0].duration_hours, 2.0);
    assert_eq!(pending[0].reason, "deadline");
}

#[test]
fn test_history_is_scoped_to_the_owner() {
    // Arrange
    let ctx = common::TestContext::new().unwrap();
    ctx.state.entries.create(common::sample_input("E100")).unwrap();
    ctx.state.entries.create(common::sample_input("E101")).unwrap();

    // Act
    let history = ctx.state.views.history_for("E100").unwrap();

    // Assert
    assert_eq!(history.len(), 1);
}

#[test]
fn test_history_preserves_append_order() {
    // Arrange
    let ctx = common::TestContext::new().unwrap();
    let mut input = common::sample_input("E100");
    input.reason = "first".to_string();
    let first = ctx.state.entries.create(input).unwrap();
    let mut input = common::sample_input("E100");
    input.reason = "second".to_string();
    let second = ctx.state.entries.create(input).unwrap();

    // Act
    let history = ctx.state.views.history_for("E100").unwrap();

    // Assert: table row order, oldest append first, no re-sort
    assert_eq!(
        history.iter().map(|h| h.id).collect::<Vec<_>>(),
        vec![first, second]
    );
    assert_eq!(history[0].reason, "first");
    assert_eq!(history[1].reason, "second");
}

#[test]
fn test_centre_filter_is_accepted_but_not_applied() {
    // Arrange: entry owned by a C1 employee
    let ctx = common::TestContext::new().unwrap();
    let id = ctx.state.entries.create(common::sample_input("E100")).unwrap();

    // Act: filter on a centre no employee belongs to
    let pending = ctx.state.views.pending_queue(Some("C9")).unwrap();

    // Assert: still returned, the filter is a documented no-op
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, id);
}

#[test]
fn test_history_for_unknown_owner_is_empty() {
    let ctx = common::TestContext::new().unwrap();
    ctx.state.entries.create(common::sample_input("E100")).unwrap();

    assert!(ctx.state.views.history_for("E999").unwrap().is_empty());
}
