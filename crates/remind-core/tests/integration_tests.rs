use chrono::NaiveDate;
use proptest::prelude::*;
use remind_core::db::establish_connection;
use remind_core::error::CoreError;
use remind_core::models::{Event, EventColumn, EventEdit, DEFAULT_EVENT_NAME, MAX_OCCURRENCE_COUNT};
use remind_core::registry::{CommitStage, CommitSummary, EventRegistry, MarkDone, ReminderRegistry};
use remind_core::repository::{
    EventRepository, OccurrenceGenerator, ReminderRepository, SqliteRepository,
};
use tempfile::TempDir;

/// Helper function to create a test database
async fn setup_test_db() -> (SqliteRepository, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("db").join("maindb");

    let pool = establish_connection(&db_path)
        .await
        .expect("Failed to establish test database connection");

    (SqliteRepository::new(pool), temp_dir)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A monthly cyclic event starting 2024-01-01
fn monthly(name: &str, count: i64) -> EventEdit {
    EventEdit {
        name: Some(name.to_string()),
        start_date: Some(date(2024, 1, 1)),
        count: Some(count),
        day_offset: Some(0),
        month_offset: Some(1),
        ..Default::default()
    }
}

/// Helper function to add and save an event through the registry
async fn create_event(repo: &SqliteRepository, edit: EventEdit) -> Event {
    let mut registry = EventRegistry::load(repo).await.expect("Failed to load registry");
    let id = registry.create_pending_row_on(date(2024, 1, 1)).id;
    let event = registry.edit_row(id, edit).await.expect("Failed to edit pending row");

    let summary = registry.commit_all().await;
    assert!(summary.is_clean(), "commit failed: {:?}", summary.failures);
    assert_eq!(summary.inserted, vec![id]);
    event
}

/// Helper function to edit and save a committed event
async fn edit_event(repo: &SqliteRepository, id: i64, edit: EventEdit) -> CommitSummary {
    let mut registry = EventRegistry::load(repo).await.expect("Failed to load registry");
    registry.edit_row(id, edit).await.expect("Failed to edit row");
    let summary = registry.commit_all().await;
    assert!(summary.is_clean(), "commit failed: {:?}", summary.failures);
    summary
}

/// (date, is_done) of every occurrence of the event, in id order
async fn occurrences(repo: &SqliteRepository, event_id: i64) -> Vec<(NaiveDate, bool)> {
    repo.find_reminders_for_event(event_id)
        .await
        .expect("Failed to load occurrences")
        .into_iter()
        .map(|r| (r.date, r.is_done))
        .collect()
}

async fn mark_done(repo: &SqliteRepository, reminder_id: i64, event_id: i64, today: NaiveDate) -> Vec<NaiveDate> {
    match ReminderRegistry::new(repo).mark_done_on(reminder_id, event_id, today).await {
        MarkDone::Completed { generated } => generated.into_iter().map(|r| r.date).collect(),
        MarkDone::Failed(e) => panic!("mark done failed: {:?}", e),
    }
}

#[test_log::test(tokio::test)]
async fn test_monthly_bill_workflow() {
    let (repo, _temp_dir) = setup_test_db().await;

    // Creation materializes the initial batch
    let event = create_event(&repo, monthly("Electricity", 3)).await;
    assert_eq!(
        occurrences(&repo, event.id).await,
        vec![
            (date(2024, 1, 1), false),
            (date(2024, 2, 1), false),
            (date(2024, 3, 1), false),
        ]
    );

    // Raising the count continues the sequence
    let summary = edit_event(&repo, event.id, EventEdit { count: Some(5), ..Default::default() }).await;
    assert_eq!(summary.updated, vec![event.id]);
    let added: Vec<NaiveDate> = summary.reconciliation.inserted.iter().map(|r| r.date).collect();
    assert_eq!(added, vec![date(2024, 4, 1), date(2024, 5, 1)]);

    // Completing the first occurrence refills the slot it freed
    let first = repo.find_reminders_for_event(event.id).await.unwrap()[0].clone();
    assert_eq!(first.date, date(2024, 1, 1));
    let generated = mark_done(&repo, first.id, event.id, date(2024, 6, 15)).await;
    assert_eq!(generated, vec![date(2024, 6, 1)]);

    let stats = repo.occurrence_stats(event.id).await.unwrap();
    assert_eq!(stats.not_done, 5);
    assert_eq!(stats.total, 6);

    // Lowering the count drops the newest not-done rows by id
    let summary = edit_event(&repo, event.id, EventEdit { count: Some(2), ..Default::default() }).await;
    assert_eq!(summary.reconciliation.deleted, 3);
    assert_eq!(
        occurrences(&repo, event.id).await,
        vec![
            (date(2024, 1, 1), true),
            (date(2024, 2, 1), false),
            (date(2024, 3, 1), false),
        ]
    );
}

#[tokio::test]
async fn test_dates_are_stored_sortable() {
    let (repo, temp_dir) = setup_test_db().await;
    let event = create_event(&repo, monthly("Rent", 2)).await;

    let pool = establish_connection(temp_dir.path().join("db").join("maindb")).await.unwrap();
    let stored: Vec<String> = sqlx::query_scalar("SELECT Date FROM ReminderEvent WHERE EventId = $1 ORDER BY Id")
        .bind(event.id)
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(stored, vec!["20240101".to_string(), "20240201".to_string()]);

    let start: String = sqlx::query_scalar("SELECT StartDate FROM Event WHERE Id = $1")
        .bind(event.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(start, "20240101");
}

#[tokio::test]
async fn test_deactivate_and_reactivate() {
    let (repo, _temp_dir) = setup_test_db().await;
    let event = create_event(&repo, monthly("Insurance", 3)).await;

    // Done before the start date: no refill
    let first = repo.find_reminders_for_event(event.id).await.unwrap()[0].clone();
    assert!(mark_done(&repo, first.id, event.id, date(2023, 12, 31)).await.is_empty());

    let summary = edit_event(&repo, event.id, EventEdit { is_active: Some(false), ..Default::default() }).await;
    assert_eq!(summary.reconciliation.deleted, 2);
    assert_eq!(occurrences(&repo, event.id).await, vec![(date(2024, 1, 1), true)]);

    // Reactivation fills up to count, done rows included, after the latest known date
    let summary = edit_event(&repo, event.id, EventEdit { is_active: Some(true), ..Default::default() }).await;
    assert_eq!(summary.reconciliation.inserted.len(), 2);
    assert_eq!(
        occurrences(&repo, event.id).await,
        vec![
            (date(2024, 1, 1), true),
            (date(2024, 2, 1), false),
            (date(2024, 3, 1), false),
        ]
    );
}

#[tokio::test]
async fn test_reactivation_with_count_change_reconciles_once() {
    let (repo, _temp_dir) = setup_test_db().await;
    let event = create_event(&repo, monthly("Gym", 2)).await;

    edit_event(&repo, event.id, EventEdit { is_active: Some(false), ..Default::default() }).await;
    assert!(occurrences(&repo, event.id).await.is_empty());

    edit_event(
        &repo,
        event.id,
        EventEdit { is_active: Some(true), count: Some(4), ..Default::default() },
    )
    .await;
    let dates: Vec<NaiveDate> = occurrences(&repo, event.id).await.into_iter().map(|(d, _)| d).collect();
    assert_eq!(
        dates,
        vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1), date(2024, 4, 1)]
    );
}

#[tokio::test]
async fn test_count_reduction_is_bounded_by_not_done_rows() {
    let (repo, _temp_dir) = setup_test_db().await;
    let event = create_event(&repo, monthly("Water", 3)).await;

    let rows = repo.find_reminders_for_event(event.id).await.unwrap();
    mark_done(&repo, rows[1].id, event.id, date(2023, 1, 1)).await;
    mark_done(&repo, rows[2].id, event.id, date(2023, 1, 1)).await;

    // Done rows are newer than the remaining not-done row, yet never deleted
    let summary = edit_event(&repo, event.id, EventEdit { count: Some(0), ..Default::default() }).await;
    assert_eq!(summary.reconciliation.deleted, 1);
    assert_eq!(
        occurrences(&repo, event.id).await,
        vec![(date(2024, 2, 1), true), (date(2024, 3, 1), true)]
    );
}

#[tokio::test]
async fn test_non_cyclic_event_gets_only_its_initial_batch() {
    let (repo, _temp_dir) = setup_test_db().await;
    let mut edit = monthly("Passport renewal", 2);
    edit.is_cyclic = Some(false);
    let event = create_event(&repo, edit).await;
    assert_eq!(occurrences(&repo, event.id).await.len(), 2);

    // Count changes do nothing
    let summary = edit_event(&repo, event.id, EventEdit { count: Some(4), ..Default::default() }).await;
    assert!(summary.reconciliation.is_noop());

    // Completion never refills
    let first = repo.find_reminders_for_event(event.id).await.unwrap()[0].clone();
    assert!(mark_done(&repo, first.id, event.id, date(2030, 1, 1)).await.is_empty());

    // Deactivation clears pending rows, reactivation does not regenerate them
    edit_event(&repo, event.id, EventEdit { is_active: Some(false), ..Default::default() }).await;
    let summary = edit_event(&repo, event.id, EventEdit { is_active: Some(true), ..Default::default() }).await;
    assert!(summary.reconciliation.is_noop());
    assert_eq!(occurrences(&repo, event.id).await, vec![(date(2024, 1, 1), true)]);
}

#[tokio::test]
async fn test_becoming_cyclic_tops_up() {
    let (repo, _temp_dir) = setup_test_db().await;
    let mut edit = monthly("Dentist", 1);
    edit.is_cyclic = Some(false);
    let event = create_event(&repo, edit).await;

    edit_event(
        &repo,
        event.id,
        EventEdit { is_cyclic: Some(true), count: Some(3), ..Default::default() },
    )
    .await;
    let dates: Vec<NaiveDate> = occurrences(&repo, event.id).await.into_iter().map(|(d, _)| d).collect();
    assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)]);
}

#[tokio::test]
async fn test_inactive_event_created_without_occurrences() {
    let (repo, _temp_dir) = setup_test_db().await;
    let mut edit = monthly("Later", 3);
    edit.is_active = Some(false);
    let event = create_event(&repo, edit).await;
    assert!(occurrences(&repo, event.id).await.is_empty());
}

#[tokio::test]
async fn test_mark_done_waits_for_start_date() {
    let (repo, _temp_dir) = setup_test_db().await;
    let mut edit = monthly("Anniversary", 2);
    edit.start_date = Some(date(2025, 5, 10));
    edit.month_offset = Some(12);
    let event = create_event(&repo, edit).await;

    let rows = repo.find_reminders_for_event(event.id).await.unwrap();
    assert!(mark_done(&repo, rows[0].id, event.id, date(2025, 5, 9)).await.is_empty());
    assert!(repo.find_reminder_by_id(rows[0].id).await.unwrap().unwrap().is_done);

    // Once the start has passed, completing a row refills from the latest date
    let generated = mark_done(&repo, rows[1].id, event.id, date(2025, 5, 10)).await;
    assert_eq!(generated, vec![date(2027, 5, 10), date(2028, 5, 10)]);
}

#[tokio::test]
async fn test_mark_done_ignores_rows_that_do_not_flip() {
    let (repo, _temp_dir) = setup_test_db().await;
    let rent = create_event(&repo, monthly("Rent", 2)).await;
    let gym = create_event(&repo, monthly("Gym", 2)).await;
    let today = date(2024, 6, 1);

    let first = repo.find_reminders_for_event(rent.id).await.unwrap()[0].clone();
    assert_eq!(mark_done(&repo, first.id, rent.id, today).await.len(), 1);

    // Already done: nothing is generated the second time
    assert!(mark_done(&repo, first.id, rent.id, today).await.is_empty());
    assert_eq!(occurrences(&repo, rent.id).await.len(), 3);

    // A reminder of another event is neither marked nor used to grow this one
    let gym_first = repo.find_reminders_for_event(gym.id).await.unwrap()[0].clone();
    let rent_pending = repo.find_reminders_for_event(rent.id).await.unwrap()[1].clone();
    assert!(mark_done(&repo, gym_first.id, rent.id, today).await.is_empty());
    assert!(mark_done(&repo, rent_pending.id, gym.id, today).await.is_empty());
    assert!(!repo.find_reminder_by_id(gym_first.id).await.unwrap().unwrap().is_done);
    assert!(!repo.find_reminder_by_id(rent_pending.id).await.unwrap().unwrap().is_done);
    assert_eq!(occurrences(&repo, gym.id).await.len(), 2);

    // Unknown reminder id
    assert!(mark_done(&repo, 999, rent.id, today).await.is_empty());
}

#[tokio::test]
async fn test_mark_done_unknown_event_fails() {
    let (repo, _temp_dir) = setup_test_db().await;
    let outcome = ReminderRegistry::new(&repo).mark_done_on(1, 42, date(2024, 1, 1)).await;
    assert!(matches!(outcome, MarkDone::Failed(CoreError::NotFound(_))));
}

/// One user action against a single cyclic event
#[derive(Debug, Clone)]
enum Step {
    SetCount(i64),
    Deactivate,
    Reactivate,
    /// Completes the n-th (modulo) not-done occurrence, if any
    MarkDone(usize),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0i64..8).prop_map(Step::SetCount),
        Just(Step::Deactivate),
        Just(Step::Reactivate),
        (0usize..8).prop_map(Step::MarkDone),
    ]
}

async fn check_not_done_bound(initial_count: i64, steps: Vec<Step>) -> Result<(), TestCaseError> {
    let (repo, _temp_dir) = setup_test_db().await;
    let event = create_event(&repo, monthly("Invariant", initial_count)).await;
    let today = date(2024, 12, 31);

    let mut count = initial_count;
    let mut active = true;

    for step in steps {
        match step {
            Step::SetCount(new_count) => {
                count = new_count;
                edit_event(&repo, event.id, EventEdit { count: Some(count), ..Default::default() }).await;
            }
            Step::Deactivate => {
                active = false;
                edit_event(&repo, event.id, EventEdit { is_active: Some(false), ..Default::default() }).await;
            }
            Step::Reactivate => {
                active = true;
                edit_event(&repo, event.id, EventEdit { is_active: Some(true), ..Default::default() }).await;
            }
            Step::MarkDone(pick) => {
                let pending: Vec<_> = repo
                    .find_reminders_for_event(event.id)
                    .await
                    .unwrap()
                    .into_iter()
                    .filter(|r| !r.is_done)
                    .collect();
                if !pending.is_empty() {
                    let reminder = &pending[pick % pending.len()];
                    mark_done(&repo, reminder.id, event.id, today).await;
                }
            }
        }

        let stats = repo.occurrence_stats(event.id).await.unwrap();
        prop_assert!(
            stats.not_done <= count,
            "{} not-done rows for count {}",
            stats.not_done,
            count
        );
        if !active {
            prop_assert_eq!(stats.not_done, 0);
        }
    }

    // Occurrence dates never go backwards in id order
    let dates: Vec<NaiveDate> = occurrences(&repo, event.id).await.into_iter().map(|(d, _)| d).collect();
    prop_assert!(dates.windows(2).all(|pair| pair[0] <= pair[1]), "{:?}", dates);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_not_done_never_exceeds_count(
        initial_count in 0i64..6,
        steps in proptest::collection::vec(step_strategy(), 1..12),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(check_not_done_bound(initial_count, steps))?;
    }
}

#[tokio::test]
async fn test_list_due() {
    let (repo, _temp_dir) = setup_test_db().await;
    let water = create_event(&repo, monthly("Water", 3)).await;
    let gas = create_event(&repo, monthly("Gas", 3)).await;
    let mut paused = monthly("Paused", 3);
    paused.is_active = Some(true);
    let paused = create_event(&repo, paused).await;
    edit_event(&repo, paused.id, EventEdit { is_active: Some(false), ..Default::default() }).await;

    let reminders = ReminderRegistry::new(&repo);
    let due = reminders.list_due(date(2024, 2, 15)).await.unwrap();
    let listed: Vec<(&str, NaiveDate)> = due.iter().map(|d| (d.event_name.as_str(), d.date)).collect();
    assert_eq!(
        listed,
        vec![
            ("Gas", date(2024, 1, 1)),
            ("Gas", date(2024, 2, 1)),
            ("Water", date(2024, 1, 1)),
            ("Water", date(2024, 2, 1)),
        ]
    );
    assert!(due.iter().all(|d| d.event_id == water.id || d.event_id == gas.id));

    // Done occurrences leave the list
    let first_gas = due[0].clone();
    mark_done(&repo, first_gas.id, first_gas.event_id, date(2023, 1, 1)).await;
    let due = reminders.list_due(date(2024, 2, 15)).await.unwrap();
    assert_eq!(due.len(), 3);
    assert!(due.iter().all(|d| d.id != first_gas.id));

    assert!(reminders.list_due(date(2023, 12, 31)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_cascades_to_occurrences() {
    let (repo, _temp_dir) = setup_test_db().await;
    let event = create_event(&repo, monthly("Old bill", 4)).await;

    let mut registry = EventRegistry::load(&repo).await.unwrap();
    registry.delete_row(event.id).await.unwrap();
    assert!(registry.rows().await.unwrap().is_empty());
    // Nothing is gone until the commit
    assert!(repo.find_event_by_id(event.id).await.unwrap().is_some());

    let summary = registry.commit_all().await;
    assert_eq!(summary.deleted, vec![event.id]);
    assert_eq!(summary.reconciliation.deleted, 4);
    assert!(repo.find_event_by_id(event.id).await.unwrap().is_none());
    assert!(occurrences(&repo, event.id).await.is_empty());
}

#[tokio::test]
async fn test_pending_overlay() {
    let (repo, _temp_dir) = setup_test_db().await;
    let committed = create_event(&repo, monthly("Committed", 1)).await;

    let mut registry = EventRegistry::load(&repo).await.unwrap();
    let a = registry.create_pending_row_on(date(2024, 3, 3)).id;
    let b = registry.create_pending_row_on(date(2024, 3, 3)).id;
    assert_eq!((a, b), (committed.id + 1, committed.id + 2));

    let rows = registry.rows().await.unwrap();
    assert_eq!(rows.iter().map(|e| e.id).collect::<Vec<_>>(), vec![committed.id, a, b]);
    assert_eq!(rows[1].name, DEFAULT_EVENT_NAME);
    assert_eq!(rows[1].start_date, date(2024, 3, 3));

    // Staged edits of committed rows show up at read time only
    registry
        .edit_row(committed.id, EventEdit { name: Some("Renamed".to_string()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(registry.rows().await.unwrap()[0].name, "Renamed");
    assert_eq!(repo.find_event_by_id(committed.id).await.unwrap().unwrap().name, "Committed");

    // Dropping a pending row never reaches the store
    registry.delete_row(a).await.unwrap();
    assert_eq!(registry.pending().inserted_ids().collect::<Vec<_>>(), vec![b]);

    registry.discard_pending();
    assert!(!registry.has_pending_changes());
    assert_eq!(registry.rows().await.unwrap().len(), 1);

    // Ids keep increasing after a discard
    let c = registry.create_pending_row_on(date(2024, 3, 3)).id;
    assert_eq!(c, b + 1);
    let summary = registry.commit_all().await;
    assert_eq!(summary.inserted, vec![c]);
    assert_eq!(repo.max_event_id().await.unwrap(), c);
}

#[tokio::test]
async fn test_edit_validation() {
    let (repo, _temp_dir) = setup_test_db().await;
    let mut registry = EventRegistry::load(&repo).await.unwrap();

    let missing = registry.edit_row(99, EventEdit::default()).await;
    assert!(matches!(missing, Err(CoreError::NotFound(_))));
    assert!(matches!(registry.delete_row(99).await, Err(CoreError::NotFound(_))));

    let id = registry.create_pending_row().id;
    let negative = registry.edit_row(id, EventEdit { count: Some(-2), ..Default::default() }).await;
    assert!(matches!(negative, Err(CoreError::InvalidInput(_))));

    let huge = registry
        .edit_row(
            id,
            EventEdit {
                count: Some(1_000_000_000_000),
                month_offset: Some(1),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(huge, Err(CoreError::InvalidInput(_))));

    // The draft keeps its defaults and still saves with its single occurrence
    let summary = registry.commit_all().await;
    assert!(summary.is_clean());
    assert_eq!(occurrences(&repo, id).await.len(), 1);
}

#[tokio::test]
async fn test_failed_hook_keeps_saved_row() {
    let (repo, _temp_dir) = setup_test_db().await;

    // A stored row whose count exceeds what one batch may schedule
    let oversized = Event {
        name: "Oversized".to_string(),
        count: MAX_OCCURRENCE_COUNT + 1,
        month_offset: 1,
        is_active: false,
        ..Event::draft(1, date(2024, 1, 1))
    };
    repo.insert_event(&oversized).await.unwrap();

    let direct = repo.reconcile_on_activation(&Event { is_active: true, ..oversized.clone() }).await;
    assert!(matches!(direct, Err(CoreError::InvalidInput(_))));
    assert!(occurrences(&repo, oversized.id).await.is_empty());

    let mut registry = EventRegistry::load(&repo).await.unwrap();
    registry
        .edit_row(oversized.id, EventEdit { is_active: Some(true), ..Default::default() })
        .await
        .unwrap();
    let summary = registry.commit_all().await;

    assert_eq!(summary.updated, vec![oversized.id]);
    assert!(summary.all_written());
    assert!(!summary.is_clean());
    assert_eq!(summary.failures_at(CommitStage::Reconcile).count(), 1);
    assert!(!registry.has_pending_changes());
    assert!(repo.find_event_by_id(oversized.id).await.unwrap().unwrap().is_active);
    assert!(occurrences(&repo, oversized.id).await.is_empty());
}

#[tokio::test]
async fn test_failed_insert_stays_pending() {
    let (repo, _temp_dir) = setup_test_db().await;

    let mut first = EventRegistry::load(&repo).await.unwrap();
    let mut second = EventRegistry::load(&repo).await.unwrap();
    let id = first.create_pending_row_on(date(2024, 1, 1)).id;
    let clash = second.create_pending_row_on(date(2024, 1, 1)).id;
    assert_eq!(id, clash);

    assert!(first.commit_all().await.is_clean());

    let summary = second.commit_all().await;
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].event_id, clash);
    assert_eq!(summary.failures[0].stage, CommitStage::Write);
    assert!(!summary.all_written());
    assert!(matches!(summary.failures[0].error, CoreError::Database(_)));
    assert_eq!(second.pending().inserted_ids().collect::<Vec<_>>(), vec![clash]);

    // The stored row keeps only its own batch
    assert_eq!(occurrences(&repo, id).await.len(), 1);
}

#[tokio::test]
async fn test_generator_direct_calls() {
    let (repo, _temp_dir) = setup_test_db().await;
    let event = create_event(&repo, monthly("Direct", 2)).await;

    // Activation is idempotent once the count is reached
    assert!(repo.reconcile_on_activation(&event).await.unwrap().is_noop());

    // Count changes on an inactive event are ignored
    let inactive = Event { is_active: false, ..event.clone() };
    assert!(repo.reconcile_count_change(&inactive, 2, 5).await.unwrap().is_noop());

    let grown = repo.reconcile_count_change(&event, 2, 3).await.unwrap();
    assert_eq!(grown.inserted.len(), 1);
    assert_eq!(grown.inserted[0].date, date(2024, 3, 1));

    let removed = repo.reconcile_on_deactivation(event.id).await.unwrap();
    assert_eq!(removed.deleted, 3);
}

#[tokio::test]
async fn test_column_titles() {
    let (repo, _temp_dir) = setup_test_db().await;
    let mut registry = EventRegistry::load(&repo).await.unwrap();

    assert_eq!(registry.column_title(EventColumn::Count), "Number");
    registry.set_column_title(EventColumn::Count, "Occurrences");
    assert_eq!(registry.column_title(EventColumn::Count), "Occurrences");

    let titles: Vec<&str> = registry.columns().map(|(_, title)| title).collect();
    assert_eq!(
        titles,
        vec!["Title", "Start Date", "Cyclic", "Occurrences", "Days", "Months", "Active"]
    );
}
