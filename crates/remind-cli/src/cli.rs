use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Remind: recurring events and the reminders they produce
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log every decision to the daily log file and stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Directory holding the db/ and log/ folders (defaults to the executable's directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage recurring events
    Event(EventCommand),
    /// List reminders that are due
    Due(DueCommand),
    /// Mark a reminder as done
    Done(DoneCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct EventCommand {
    #[command(subcommand)]
    pub command: EventSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum EventSubcommand {
    /// Add a new event
    Add(AddEventCommand),
    /// List events
    List,
    /// Edit an event
    Edit(EditEventCommand),
    /// Delete events and all their reminders
    Delete(DeleteEventCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddEventCommand {
    /// The title of the event
    #[arg(long)]
    pub name: Option<String>,
    /// Date of the first reminder (dd-mm-yyyy, yyyymmdd, or e.g. "next friday")
    #[arg(short, long)]
    pub start: Option<String>,
    /// Total number of reminders for this event
    #[arg(short = 'n', long)]
    pub count: Option<i64>,
    /// Days between two reminders
    #[arg(long, allow_negative_numbers = true)]
    pub days: Option<i64>,
    /// Months between two reminders
    #[arg(long, allow_negative_numbers = true)]
    pub months: Option<i64>,
    /// Only create the initial reminders; never schedule more
    #[arg(long)]
    pub once: bool,
    /// Save the event without scheduling anything yet
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditEventCommand {
    /// The ID of the event to edit
    pub id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub start: Option<String>,
    #[arg(short = 'n', long)]
    pub count: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    pub days: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    pub months: Option<i64>,
    /// Whether the event keeps scheduling reminders (true/false)
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub cyclic: Option<bool>,
    /// Whether the event is active (true/false)
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub active: Option<bool>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteEventCommand {
    /// The IDs of the events to delete
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<i64>,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DueCommand {
    /// Show reminders due on or before this date (defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the reminder to mark as done
    pub id: i64,
}
