//! Collaborator-facing registries.
//!
//! [`EventRegistry`] stages edits to event rows in memory and flushes them
//! on [`EventRegistry::commit_all`], running the occurrence reconciliation
//! each write calls for right after the write itself. [`ReminderRegistry`]
//! serves the due list and the mark-done action.
//!
//! Write paths never return store errors: a failed write is logged and
//! reported back in the outcome, and the caller's view may disagree with
//! the store until the next commit.

use std::collections::{BTreeMap, BTreeSet};
use std::mem;

use chrono::{Local, NaiveDate};

use crate::error::CoreError;
use crate::models::{DueReminder, Event, EventColumn, EventEdit, Reconciliation, ReminderEvent};
use crate::repository::Repository;
use crate::schedule::{plan_insert, plan_update, Transition};

/// Today's date on the local clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Uncommitted changes layered over the committed event rows.
#[derive(Debug, Default)]
pub struct PendingOverlay {
    /// Rows created in this session, keyed by their pending id.
    inserted: BTreeMap<i64, Event>,
    /// Edited copies of committed rows.
    updated: BTreeMap<i64, Event>,
    /// Committed rows to delete.
    deleted: BTreeSet<i64>,
}

impl PendingOverlay {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    pub fn inserted_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.inserted.keys().copied()
    }

    pub fn updated_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.updated.keys().copied()
    }

    pub fn deleted_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.deleted.iter().copied()
    }

    /// Lays the overlay over `committed` rows, returning rows ordered by id.
    fn merge(&self, committed: Vec<Event>) -> Vec<Event> {
        let mut rows: BTreeMap<i64, Event> = committed
            .into_iter()
            .filter(|event| !self.deleted.contains(&event.id))
            .map(|event| (event.id, event))
            .collect();

        for (id, event) in &self.updated {
            if let Some(row) = rows.get_mut(id) {
                *row = event.clone();
            }
        }
        for (id, event) in &self.inserted {
            rows.insert(*id, event.clone());
        }

        rows.into_values().collect()
    }
}

/// The step of a commit that went wrong for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStage {
    /// The event row was not written and stays pending.
    Write,
    /// The event row was saved but its occurrences were not reconciled.
    Reconcile,
}

/// A row that could not be flushed, or whose hook failed after the flush.
#[derive(Debug)]
pub struct CommitFailure {
    pub event_id: i64,
    pub stage: CommitStage,
    pub error: CoreError,
}

/// What [`EventRegistry::commit_all`] did.
#[derive(Debug, Default)]
pub struct CommitSummary {
    pub inserted: Vec<i64>,
    pub updated: Vec<i64>,
    pub deleted: Vec<i64>,
    /// Occurrence rows added and removed by the post-write hooks and cascades.
    pub reconciliation: Reconciliation,
    pub failures: Vec<CommitFailure>,
}

impl CommitSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether every staged row reached the store, even if a hook failed afterwards.
    pub fn all_written(&self) -> bool {
        self.failures.iter().all(|f| f.stage != CommitStage::Write)
    }

    pub fn failures_at(&self, stage: CommitStage) -> impl Iterator<Item = &CommitFailure> + '_ {
        self.failures.iter().filter(move |f| f.stage == stage)
    }

    fn fail(&mut self, event_id: i64, stage: CommitStage, error: CoreError) {
        match stage {
            CommitStage::Write => tracing::error!(event_id, error = ?error, "Event write failed"),
            CommitStage::Reconcile => {
                tracing::error!(event_id, error = ?error, "Occurrence reconciliation failed")
            }
        }
        self.failures.push(CommitFailure { event_id, stage, error });
    }
}

/// CRUD over event rows with a transient overlay of uncommitted edits.
pub struct EventRegistry<'a, R: Repository> {
    repo: &'a R,
    last_id: i64,
    overlay: PendingOverlay,
    column_titles: BTreeMap<EventColumn, String>,
}

impl<'a, R: Repository> EventRegistry<'a, R> {
    /// Opens a registry over `repo`; new rows are numbered after the highest stored id.
    pub async fn load(repo: &'a R) -> Result<Self, CoreError> {
        let last_id = repo.max_event_id().await?;
        tracing::debug!(last_id, "Event registry loaded");

        Ok(Self {
            repo,
            last_id,
            overlay: PendingOverlay::default(),
            column_titles: BTreeMap::new(),
        })
    }

    /// Adds a default row dated today. It is not persisted until [`commit_all`](Self::commit_all).
    pub fn create_pending_row(&mut self) -> &Event {
        self.create_pending_row_on(local_today())
    }

    pub fn create_pending_row_on(&mut self, today: NaiveDate) -> &Event {
        self.last_id += 1;
        let id = self.last_id;
        tracing::debug!(event_id = id, "Pending row created");

        self.overlay
            .inserted
            .entry(id)
            .or_insert_with(|| Event::draft(id, today))
    }

    /// Stages cell edits on a pending or committed row and returns the edited row.
    pub async fn edit_row(&mut self, id: i64, edit: EventEdit) -> Result<Event, CoreError> {
        if let Some(draft) = self.overlay.inserted.get_mut(&id) {
            draft.apply(edit)?;
            return Ok(draft.clone());
        }
        if self.overlay.deleted.contains(&id) {
            return Err(CoreError::NotFound(format!("Event with id {} is marked for deletion", id)));
        }

        let mut row = match self.overlay.updated.get(&id) {
            Some(row) => row.clone(),
            None => self
                .repo
                .find_event_by_id(id)
                .await?
                .ok_or_else(|| CoreError::NotFound(format!("Event with id {} not found", id)))?,
        };
        row.apply(edit)?;
        self.overlay.updated.insert(id, row.clone());
        Ok(row)
    }

    /// Removes a row. A pending row simply disappears; a committed one is
    /// deleted, together with its occurrences, on the next commit.
    pub async fn delete_row(&mut self, id: i64) -> Result<(), CoreError> {
        if self.overlay.inserted.remove(&id).is_some() {
            tracing::debug!(event_id = id, "Pending row dropped before save");
            return Ok(());
        }

        if self.repo.find_event_by_id(id).await?.is_none() {
            return Err(CoreError::NotFound(format!("Event with id {} not found", id)));
        }
        self.overlay.updated.remove(&id);
        self.overlay.deleted.insert(id);
        tracing::debug!(event_id = id, "Row marked for deletion");
        Ok(())
    }

    /// Committed rows with the pending overlay applied, ordered by id.
    pub async fn rows(&self) -> Result<Vec<Event>, CoreError> {
        let committed = self.repo.find_events().await?;
        Ok(self.overlay.merge(committed))
    }

    pub fn pending(&self) -> &PendingOverlay {
        &self.overlay
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.overlay.is_empty()
    }

    /// Throws away every uncommitted change.
    pub fn discard_pending(&mut self) {
        tracing::debug!("Pending changes discarded");
        self.overlay = PendingOverlay::default();
    }

    /// Flushes the overlay: deletions, then inserts, then updates.
    ///
    /// Every successful write is followed by its reconciliation hook before
    /// the next row is touched. Rows whose write fails stay pending.
    pub async fn commit_all(&mut self) -> CommitSummary {
        let mut summary = CommitSummary::default();

        for id in mem::take(&mut self.overlay.deleted) {
            match self.repo.delete_event(id).await {
                Ok(occurrences) => {
                    summary.deleted.push(id);
                    summary.reconciliation.deleted += occurrences;
                }
                Err(error) => {
                    summary.fail(id, CommitStage::Write, error);
                    self.overlay.deleted.insert(id);
                }
            }
        }

        for (id, event) in mem::take(&mut self.overlay.inserted) {
            if let Err(error) = self.repo.insert_event(&event).await {
                summary.fail(id, CommitStage::Write, error);
                self.overlay.inserted.insert(id, event);
                continue;
            }
            summary.inserted.push(id);

            if let Some(transition) = plan_insert(&event) {
                self.run_hook(&event, transition, &mut summary).await;
            }
        }

        for (id, event) in mem::take(&mut self.overlay.updated) {
            let old = match self.repo.find_event_by_id(id).await {
                Ok(Some(old)) => old,
                Ok(None) => {
                    summary.fail(
                        id,
                        CommitStage::Write,
                        CoreError::NotFound(format!("Event with id {} not found", id)),
                    );
                    continue;
                }
                Err(error) => {
                    summary.fail(id, CommitStage::Write, error);
                    self.overlay.updated.insert(id, event);
                    continue;
                }
            };

            if let Err(error) = self.repo.update_event(&event).await {
                summary.fail(id, CommitStage::Write, error);
                self.overlay.updated.insert(id, event);
                continue;
            }
            summary.updated.push(id);

            if let Some(transition) = plan_update(&old, &event) {
                self.run_hook(&event, transition, &mut summary).await;
            }
        }

        tracing::info!(
            inserted = summary.inserted.len(),
            updated = summary.updated.len(),
            deleted = summary.deleted.len(),
            failed = summary.failures.len(),
            "Model saved"
        );
        summary
    }

    async fn run_hook(&self, event: &Event, transition: Transition, summary: &mut CommitSummary) {
        tracing::debug!(event_id = event.id, ?transition, "Running reconciliation hook");

        let result = match transition {
            Transition::Activated => self.repo.reconcile_on_activation(event).await,
            Transition::Deactivated => self.repo.reconcile_on_deactivation(event.id).await,
            Transition::CountChanged { old, new } => {
                self.repo.reconcile_count_change(event, old, new).await
            }
        };

        match result {
            Ok(reconciliation) => summary.reconciliation.merge(reconciliation),
            Err(error) => summary.fail(event.id, CommitStage::Reconcile, error),
        }
    }

    /// Renames a column for display. Presentation metadata only.
    pub fn set_column_title(&mut self, column: EventColumn, title: impl Into<String>) {
        self.column_titles.insert(column, title.into());
    }

    pub fn column_title(&self, column: EventColumn) -> &str {
        self.column_titles
            .get(&column)
            .map(String::as_str)
            .unwrap_or_else(|| column.default_title())
    }

    /// All columns in display order with their current titles.
    pub fn columns(&self) -> impl Iterator<Item = (EventColumn, &str)> + '_ {
        EventColumn::ALL
            .into_iter()
            .map(move |column| (column, self.column_title(column)))
    }
}

/// Outcome of marking an occurrence done.
#[derive(Debug)]
pub enum MarkDone {
    /// The flag is set; `generated` holds the occurrences appended to refill the schedule.
    Completed { generated: Vec<ReminderEvent> },
    /// The store rejected the change. Already logged.
    Failed(CoreError),
}

/// Read access to due occurrences and the mark-done action.
pub struct ReminderRegistry<'a, R: Repository> {
    repo: &'a R,
}

impl<'a, R: Repository> ReminderRegistry<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Not-done occurrences of active events due on or before `as_of`, ordered by event title.
    pub async fn list_due(&self, as_of: NaiveDate) -> Result<Vec<DueReminder>, CoreError> {
        let due = self.repo.find_due_reminders(as_of).await?;
        tracing::debug!(as_of = %as_of, count = due.len(), "Data refreshed");
        Ok(due)
    }

    pub async fn mark_done(&self, reminder_id: i64, event_id: i64) -> MarkDone {
        self.mark_done_on(reminder_id, event_id, local_today()).await
    }

    pub async fn mark_done_on(&self, reminder_id: i64, event_id: i64, today: NaiveDate) -> MarkDone {
        match self.repo.reconcile_on_mark_done(reminder_id, event_id, today).await {
            Ok(reconciliation) => MarkDone::Completed {
                generated: reconciliation.inserted,
            },
            Err(error) => {
                tracing::error!(reminder_id, event_id, error = ?error, "Marking occurrence done failed");
                MarkDone::Failed(error)
            }
        }
    }
}
