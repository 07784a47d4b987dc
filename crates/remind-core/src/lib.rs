//! # Remind Core Library
//!
//! Recurring events and the reminder occurrences materialized from them.
//!
//! An [`Event`](models::Event) describes a cadence: a start date, a day and
//! month offset between occurrences, and how many occurrences it should have
//! in total. Occurrences are stored as [`ReminderEvent`](models::ReminderEvent)
//! rows and kept consistent with the event as it is edited, deactivated, or
//! worked through.
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and the stored date format
//! - [`schedule`]: Date arithmetic and reconciliation planning
//! - [`repository`]: Data access layer and the occurrence generator
//! - [`registry`]: Pending-row overlay, commit hooks, and the due list
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use remind_core::{
//!     db, models::EventEdit, registry::{EventRegistry, ReminderRegistry, local_today},
//!     repository::SqliteRepository,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), remind_core::error::CoreError> {
//!     let pool = db::establish_connection("db/maindb").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     // Define a monthly bill with three upcoming occurrences
//!     let mut events = EventRegistry::load(&repo).await?;
//!     let id = events.create_pending_row().id;
//!     events.edit_row(id, EventEdit {
//!         name: Some("Electricity bill".to_string()),
//!         count: Some(3),
//!         month_offset: Some(1),
//!         ..Default::default()
//!     }).await?;
//!     events.commit_all().await;
//!
//!     let reminders = ReminderRegistry::new(&repo);
//!     for due in reminders.list_due(local_today()).await? {
//!         println!("{} {}", due.date, due.event_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod registry;
pub mod repository;
pub mod schedule;
