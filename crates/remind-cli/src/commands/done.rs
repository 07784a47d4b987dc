use crate::cli::DoneCommand;
use crate::views::table::display_scheduled;
use anyhow::Result;
use remind_core::error::CoreError;
use remind_core::models::display_date;
use remind_core::registry::{MarkDone, ReminderRegistry};
use remind_core::repository::{ReminderRepository, Repository};

pub async fn mark_done(repo: &impl Repository, command: DoneCommand) -> Result<()> {
    let reminder = repo
        .find_reminder_by_id(command.id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Reminder with id {} not found", command.id)))?;

    if reminder.is_done {
        println!("Reminder #{} is already done.", reminder.id);
        return Ok(());
    }

    match ReminderRegistry::new(repo).mark_done(reminder.id, reminder.event_id).await {
        MarkDone::Completed { generated } => {
            println!(
                "Reminder #{} ({}) marked as done.",
                reminder.id,
                display_date(reminder.date)
            );
            display_scheduled(generated.iter().map(|r| r.date));
            Ok(())
        }
        MarkDone::Failed(error) => Err(error.into()),
    }
}
