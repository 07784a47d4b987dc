use crate::error::CoreError;
use crate::models::{DueReminder, OccurrenceStats, ReminderEvent, StoreDate};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqliteConnection;

#[async_trait]
impl super::ReminderRepository for SqliteRepository {
    async fn find_reminder_by_id(&self, id: i64) -> Result<Option<ReminderEvent>, CoreError> {
        let reminder = sqlx::query_as(
            "SELECT Id, EventId, Date, IsDone FROM ReminderEvent WHERE Id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(reminder)
    }

    async fn find_reminders_for_event(&self, event_id: i64) -> Result<Vec<ReminderEvent>, CoreError> {
        let reminders = sqlx::query_as(
            r#"SELECT Id, EventId, Date, IsDone
            FROM ReminderEvent
            WHERE EventId = $1
            ORDER BY Id"#,
        )
        .bind(event_id)
        .fetch_all(self.pool())
        .await?;
        Ok(reminders)
    }

    async fn find_due_reminders(&self, as_of: NaiveDate) -> Result<Vec<DueReminder>, CoreError> {
        let reminders = sqlx::query_as(
            r#"SELECT R.Id, R.EventId, R.Date, E.Name
            FROM ReminderEvent AS R
            INNER JOIN Event AS E ON R.EventId = E.Id
            WHERE E.IsActive = 1
            AND R.IsDone = 0
            AND R.Date <= $1
            ORDER BY E.Name, R.Date, R.Id"#,
        )
        .bind(StoreDate(as_of))
        .fetch_all(self.pool())
        .await?;
        Ok(reminders)
    }

    async fn occurrence_stats(&self, event_id: i64) -> Result<OccurrenceStats, CoreError> {
        let mut conn = self.pool().acquire().await?;
        Self::occurrence_stats_with(&mut *conn, event_id).await
    }
}

impl SqliteRepository {
    /// Counts an event's occurrences and finds the date of the newest one.
    ///
    /// Ids are handed out in date order, so the highest id carries the
    /// latest known date of the sequence.
    pub(crate) async fn occurrence_stats_with(
        conn: &mut SqliteConnection,
        event_id: i64,
    ) -> Result<OccurrenceStats, CoreError> {
        let (total, not_done): (i64, i64) = sqlx::query_as(
            r#"SELECT COUNT(*), COALESCE(SUM(CASE WHEN IsDone = 0 THEN 1 ELSE 0 END), 0)
            FROM ReminderEvent
            WHERE EventId = $1"#,
        )
        .bind(event_id)
        .fetch_one(&mut *conn)
        .await?;

        let latest_date: Option<StoreDate> = sqlx::query_scalar(
            "SELECT Date FROM ReminderEvent WHERE EventId = $1 ORDER BY Id DESC LIMIT 1",
        )
        .bind(event_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(OccurrenceStats {
            total,
            not_done,
            latest_date: latest_date.map(NaiveDate::from),
        })
    }
}
