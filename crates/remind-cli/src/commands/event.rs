use crate::cli::{AddEventCommand, DeleteEventCommand, EditEventCommand, EventCommand, EventSubcommand};
use crate::parser::parse_date;
use crate::views::table::{display_events, display_scheduled};
use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use remind_core::models::{EventColumn, EventEdit};
use remind_core::registry::{CommitStage, CommitSummary, EventRegistry};
use remind_core::repository::Repository;
use std::collections::BTreeMap;

pub async fn event_command(
    repo: &impl Repository,
    command: EventCommand,
    column_titles: &BTreeMap<String, String>,
) -> Result<()> {
    match command.command {
        EventSubcommand::Add(command) => add_event(repo, command).await,
        EventSubcommand::List => list_events(repo, column_titles).await,
        EventSubcommand::Edit(command) => edit_event(repo, command).await,
        EventSubcommand::Delete(command) => delete_events(repo, command).await,
    }
}

/// Turns rows that never reached the store into an error naming them.
fn ensure_saved(summary: &CommitSummary) -> Result<()> {
    if summary.all_written() {
        return Ok(());
    }
    let details: Vec<String> = summary
        .failures_at(CommitStage::Write)
        .map(|failure| format!("event {}: {}", failure.event_id, failure.error))
        .collect();
    Err(anyhow!("Changes could not be saved ({})", details.join("; ")))
}

/// Saved rows whose reminders could not be brought in line.
fn reconcile_warnings(summary: &CommitSummary) -> Vec<String> {
    summary
        .failures_at(CommitStage::Reconcile)
        .map(|failure| {
            format!(
                "Event #{} was saved, but its reminders could not be updated: {}",
                failure.event_id, failure.error
            )
        })
        .collect()
}

fn report_reconciliation(summary: &CommitSummary) {
    display_scheduled(summary.reconciliation.inserted.iter().map(|r| r.date));
    if summary.reconciliation.deleted > 0 {
        println!("Removed {} reminder(s).", summary.reconciliation.deleted);
    }
    for warning in reconcile_warnings(summary) {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }
}

async fn add_event(repo: &impl Repository, command: AddEventCommand) -> Result<()> {
    let mut registry = EventRegistry::load(repo).await?;
    let id = registry.create_pending_row().id;

    let edit = EventEdit {
        name: command.name,
        start_date: command.start.as_deref().map(parse_date).transpose()?,
        is_cyclic: command.once.then_some(false),
        count: command.count,
        day_offset: command.days,
        month_offset: command.months,
        is_active: command.inactive.then_some(false),
    };
    let event = registry.edit_row(id, edit).await?;

    let summary = registry.commit_all().await;
    ensure_saved(&summary)?;

    println!("Added event #{}: '{}'", event.id, event.name);
    report_reconciliation(&summary);
    Ok(())
}

async fn list_events(repo: &impl Repository, column_titles: &BTreeMap<String, String>) -> Result<()> {
    let mut registry = EventRegistry::load(repo).await?;
    for (name, title) in column_titles {
        let column: EventColumn = name.parse()?;
        registry.set_column_title(column, title.as_str());
    }

    let events = registry.rows().await?;
    display_events(&events, registry.columns());
    Ok(())
}

async fn edit_event(repo: &impl Repository, command: EditEventCommand) -> Result<()> {
    let edit = EventEdit {
        name: command.name,
        start_date: command.start.as_deref().map(parse_date).transpose()?,
        is_cyclic: command.cyclic,
        count: command.count,
        day_offset: command.days,
        month_offset: command.months,
        is_active: command.active,
    };
    if edit.is_empty() {
        return Err(anyhow!("Nothing to change. Pass at least one field to edit."));
    }

    let mut registry = EventRegistry::load(repo).await?;
    let event = registry.edit_row(command.id, edit).await?;

    let summary = registry.commit_all().await;
    ensure_saved(&summary)?;

    println!("Updated event #{}: '{}'", event.id, event.name);
    report_reconciliation(&summary);
    Ok(())
}

async fn delete_events(repo: &impl Repository, command: DeleteEventCommand) -> Result<()> {
    let mut registry = EventRegistry::load(repo).await?;
    for id in &command.ids {
        registry.delete_row(*id).await?;
    }

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt("Do you want to delete selected events and all their reminders?")
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            registry.discard_pending();
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let summary = registry.commit_all().await;
    ensure_saved(&summary)?;

    println!(
        "Deleted {} event(s) and {} reminder(s).",
        summary.deleted.len(),
        summary.reconciliation.deleted
    );
    Ok(())
}
