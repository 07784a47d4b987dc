use crate::error::CoreError;
use crate::models::{Event, Reconciliation, ReminderEvent, StoreDate};
use crate::repository::SqliteRepository;
use crate::schedule::{excess_occurrences, missing_occurrences, top_up_after_done, upcoming_dates};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqliteConnection;

#[async_trait]
impl super::OccurrenceGenerator for SqliteRepository {
    async fn reconcile_on_activation(&self, event: &Event) -> Result<Reconciliation, CoreError> {
        let mut tx = self.pool().begin().await?;

        let stats = Self::occurrence_stats_with(&mut *tx, event.id).await?;
        let missing = missing_occurrences(event.count, stats.total);
        tracing::info!(
            event_id = event.id,
            count = event.count,
            existing = stats.total,
            missing,
            "Reconciling activated event"
        );

        let dates = upcoming_dates(event.start_date, stats.latest_date, event.cadence(), missing)?;
        let inserted = Self::insert_occurrences_with(&mut *tx, event.id, &dates).await?;

        tx.commit().await?;
        Ok(Reconciliation { inserted, deleted: 0 })
    }

    async fn reconcile_on_deactivation(&self, event_id: i64) -> Result<Reconciliation, CoreError> {
        let deleted = sqlx::query("DELETE FROM ReminderEvent WHERE IsDone = 0 AND EventId = $1")
            .bind(event_id)
            .execute(self.pool())
            .await?
            .rows_affected();

        tracing::info!(event_id, deleted, "Removed pending occurrences of deactivated event");
        Ok(Reconciliation { inserted: Vec::new(), deleted })
    }

    async fn reconcile_count_change(
        &self,
        event: &Event,
        old_count: i64,
        new_count: i64,
    ) -> Result<Reconciliation, CoreError> {
        if !event.generates_occurrences() || old_count == new_count {
            tracing::debug!(event_id = event.id, old_count, new_count, "Count change needs no reconciliation");
            return Ok(Reconciliation::default());
        }

        let mut tx = self.pool().begin().await?;

        let outcome = if new_count > old_count {
            let stats = Self::occurrence_stats_with(&mut *tx, event.id).await?;
            let missing = missing_occurrences(new_count, old_count);
            let dates = upcoming_dates(event.start_date, stats.latest_date, event.cadence(), missing)?;
            tracing::info!(event_id = event.id, old_count, new_count, missing, "Count raised");

            let inserted = Self::insert_occurrences_with(&mut *tx, event.id, &dates).await?;
            Reconciliation { inserted, deleted: 0 }
        } else {
            let excess = excess_occurrences(old_count, new_count);
            let deleted = Self::delete_newest_pending_with(&mut *tx, event.id, excess).await?;
            tracing::info!(event_id = event.id, old_count, new_count, excess, deleted, "Count lowered");

            Reconciliation { inserted: Vec::new(), deleted }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    async fn reconcile_on_mark_done(
        &self,
        reminder_id: i64,
        event_id: i64,
        today: NaiveDate,
    ) -> Result<Reconciliation, CoreError> {
        let mut tx = self.pool().begin().await?;

        let event: Event = sqlx::query_as(
            r#"SELECT Id, Name, StartDate, IsCyclic, Count, Day, Month, IsActive
            FROM Event
            WHERE Id = $1"#,
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Event with id {} not found", event_id)))?;

        let marked = sqlx::query(
            "UPDATE ReminderEvent SET IsDone = 1 WHERE IsDone = 0 AND Id = $1 AND EventId = $2",
        )
        .bind(reminder_id)
        .bind(event_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        // Only a row that actually flipped to done may grow the schedule.
        if marked == 0 {
            tracing::debug!(reminder_id, event_id, "Occurrence was already done or belongs elsewhere");
            tx.commit().await?;
            return Ok(Reconciliation::default());
        }

        let stats = Self::occurrence_stats_with(&mut *tx, event_id).await?;
        let to_add = top_up_after_done(&event, stats.not_done, today);
        tracing::info!(reminder_id, event_id, not_done = stats.not_done, to_add, "Occurrence marked done");

        let dates = upcoming_dates(event.start_date, stats.latest_date, event.cadence(), to_add)?;
        let inserted = Self::insert_occurrences_with(&mut *tx, event_id, &dates).await?;

        tx.commit().await?;
        Ok(Reconciliation { inserted, deleted: 0 })
    }
}

impl SqliteRepository {
    /// Appends one not-done occurrence per date, in order, so ids follow dates.
    pub(crate) async fn insert_occurrences_with(
        conn: &mut SqliteConnection,
        event_id: i64,
        dates: &[NaiveDate],
    ) -> Result<Vec<ReminderEvent>, CoreError> {
        let mut inserted = Vec::new();

        for &date in dates {
            let id = sqlx::query("INSERT INTO ReminderEvent (EventId, Date, IsDone) VALUES ($1, $2, 0)")
                .bind(event_id)
                .bind(StoreDate(date))
                .execute(&mut *conn)
                .await?
                .last_insert_rowid();

            tracing::debug!(event_id, reminder_id = id, date = %date, "Occurrence inserted");
            inserted.push(ReminderEvent {
                id,
                event_id,
                date,
                is_done: false,
            });
        }

        Ok(inserted)
    }

    /// Deletes up to `limit` not-done occurrences of the event, newest id first.
    ///
    /// Done rows are never touched; when fewer than `limit` not-done rows
    /// exist, only those are removed.
    pub(crate) async fn delete_newest_pending_with(
        conn: &mut SqliteConnection,
        event_id: i64,
        limit: i64,
    ) -> Result<u64, CoreError> {
        if limit <= 0 {
            return Ok(0);
        }

        let deleted = sqlx::query(
            r#"DELETE FROM ReminderEvent
            WHERE Id IN
            (
                SELECT Id FROM ReminderEvent
                WHERE IsDone = 0 AND EventId = $1
                ORDER BY Id DESC LIMIT $2
            )"#,
        )
        .bind(event_id)
        .bind(limit)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        Ok(deleted)
    }
}
