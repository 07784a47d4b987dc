use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{DueReminder, Event, OccurrenceStats, Reconciliation, ReminderEvent};
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod events;
pub mod occurrences;
pub mod reminders;

/// Domain-specific trait for event (recurrence definition) rows
#[async_trait]
pub trait EventRepository {
    /// Highest event id in the store, 0 when empty.
    async fn max_event_id(&self) -> Result<i64, CoreError>;
    async fn find_event_by_id(&self, id: i64) -> Result<Option<Event>, CoreError>;
    async fn find_events(&self) -> Result<Vec<Event>, CoreError>;
    async fn insert_event(&self, event: &Event) -> Result<(), CoreError>;
    async fn update_event(&self, event: &Event) -> Result<(), CoreError>;
    /// Deletes the event and all of its occurrences, returning how many occurrences went with it.
    async fn delete_event(&self, id: i64) -> Result<u64, CoreError>;
}

/// Domain-specific trait for materialized occurrence rows
#[async_trait]
pub trait ReminderRepository {
    async fn find_reminder_by_id(&self, id: i64) -> Result<Option<ReminderEvent>, CoreError>;
    async fn find_reminders_for_event(&self, event_id: i64) -> Result<Vec<ReminderEvent>, CoreError>;
    /// Not-done occurrences of active events dated on or before `as_of`, ordered by event name.
    async fn find_due_reminders(&self, as_of: NaiveDate) -> Result<Vec<DueReminder>, CoreError>;
    async fn occurrence_stats(&self, event_id: i64) -> Result<OccurrenceStats, CoreError>;
}

/// Keeps an event's materialized occurrences in line with its parameters
#[async_trait]
pub trait OccurrenceGenerator {
    /// Fills the event up to `count` rows (done ones included).
    async fn reconcile_on_activation(&self, event: &Event) -> Result<Reconciliation, CoreError>;
    /// Drops every not-done occurrence of the event; done ones stay as history.
    async fn reconcile_on_deactivation(&self, event_id: i64) -> Result<Reconciliation, CoreError>;
    /// Grows or shrinks the not-done tail after `count` moved from `old_count` to `new_count`.
    async fn reconcile_count_change(
        &self,
        event: &Event,
        old_count: i64,
        new_count: i64,
    ) -> Result<Reconciliation, CoreError>;
    /// Marks the occurrence done and tops the schedule up if the event allows it.
    /// An occurrence that is already done, or not one of the event's, changes nothing.
    async fn reconcile_on_mark_done(
        &self,
        reminder_id: i64,
        event_id: i64,
        today: NaiveDate,
    ) -> Result<Reconciliation, CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: EventRepository + ReminderRepository + OccurrenceGenerator + Send + Sync {}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}
