use crate::error::CoreError;
use crate::models::{Event, StoreDate};
use crate::repository::SqliteRepository;
use async_trait::async_trait;

#[async_trait]
impl super::EventRepository for SqliteRepository {
    async fn max_event_id(&self) -> Result<i64, CoreError> {
        let max_id: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(Id), 0) FROM Event")
            .fetch_one(self.pool())
            .await?;
        Ok(max_id)
    }

    async fn find_event_by_id(&self, id: i64) -> Result<Option<Event>, CoreError> {
        let event = sqlx::query_as(
            r#"SELECT Id, Name, StartDate, IsCyclic, Count, Day, Month, IsActive
            FROM Event
            WHERE Id = $1"#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(event)
    }

    async fn find_events(&self) -> Result<Vec<Event>, CoreError> {
        let events = sqlx::query_as(
            r#"SELECT Id, Name, StartDate, IsCyclic, Count, Day, Month, IsActive
            FROM Event
            ORDER BY Id"#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(events)
    }

    async fn insert_event(&self, event: &Event) -> Result<(), CoreError> {
        sqlx::query(
            r#"INSERT INTO Event (Id, Name, StartDate, IsCyclic, Count, Day, Month, IsActive)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(StoreDate(event.start_date))
        .bind(event.is_cyclic)
        .bind(event.count)
        .bind(event.day_offset)
        .bind(event.month_offset)
        .bind(event.is_active)
        .execute(self.pool())
        .await?;

        tracing::debug!(event_id = event.id, "Event inserted");
        Ok(())
    }

    async fn update_event(&self, event: &Event) -> Result<(), CoreError> {
        let result = sqlx::query(
            r#"UPDATE Event
            SET Name = $1, StartDate = $2, IsCyclic = $3, Count = $4, Day = $5, Month = $6, IsActive = $7
            WHERE Id = $8"#,
        )
        .bind(&event.name)
        .bind(StoreDate(event.start_date))
        .bind(event.is_cyclic)
        .bind(event.count)
        .bind(event.day_offset)
        .bind(event.month_offset)
        .bind(event.is_active)
        .bind(event.id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Event with id {} not found", event.id)));
        }

        tracing::debug!(event_id = event.id, "Event updated");
        Ok(())
    }

    async fn delete_event(&self, id: i64) -> Result<u64, CoreError> {
        let mut tx = self.pool().begin().await?;

        let occurrences = sqlx::query("DELETE FROM ReminderEvent WHERE EventId = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM Event WHERE Id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Event with id {} not found", id)));
        }

        tx.commit().await?;
        tracing::debug!(event_id = id, occurrences, "Event deleted");
        Ok(occurrences)
    }
}
