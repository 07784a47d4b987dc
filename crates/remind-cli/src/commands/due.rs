use crate::cli::DueCommand;
use crate::parser::parse_date;
use crate::views::table::display_due;
use anyhow::Result;
use remind_core::registry::{local_today, ReminderRegistry};
use remind_core::repository::Repository;

pub async fn list_due(repo: &impl Repository, command: DueCommand) -> Result<()> {
    let today = local_today();
    let as_of = match command.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => today,
    };

    let reminders = ReminderRegistry::new(repo).list_due(as_of).await?;
    display_due(&reminders, today);
    Ok(())
}
