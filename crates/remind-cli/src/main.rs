use anyhow::Context;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use remind_core::db;
use remind_core::error::CoreError;
use remind_core::repository::SqliteRepository;

mod cli;
mod commands;
mod config;
mod logging;
mod parser;
mod paths;
mod views;

use config::AppConfig;
use paths::Paths;

/// Exit code when the store or log directories cannot be set up.
const EXIT_STARTUP_FAILURE: i32 = 2;
const EXIT_COMMAND_FAILURE: i32 = 1;

/// Loads configuration, prepares directories and logging, and opens the store.
async fn startup(cli: &cli::Cli) -> anyhow::Result<(AppConfig, SqliteRepository)> {
    let config = AppConfig::load(cli.root.as_deref(), cli.verbose).context("Failed to load configuration")?;
    let paths = Paths::resolve(&config);
    let created = paths
        .ensure()
        .with_context(|| format!("Failed to create directories under {}", paths.root.display()))?;

    logging::init(&paths.log_dir, config.verbose)?;
    for dir in &created {
        tracing::info!(dir = %dir.display(), "Directory created");
    }

    let pool = db::establish_connection(&paths.db_file).await.map_err(|e| {
        tracing::error!(error = ?e, db_file = %paths.db_file.display(), "Failed to open the database");
        e
    })?;
    tracing::debug!(db_file = %paths.db_file.display(), "Database ready");

    Ok((config, SqliteRepository::new(pool)))
}

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let (config, repository) = match startup(&cli).await {
        Ok(ready) => ready,
        Err(e) => {
            handle_error(e);
            std::process::exit(EXIT_STARTUP_FAILURE);
        }
    };

    let result = match cli.command {
        cli::Commands::Event(command) => {
            commands::event::event_command(&repository, command, &config.column_titles).await
        }
        cli::Commands::Due(command) => commands::due::list_due(&repository, command).await,
        cli::Commands::Done(command) => commands::done::mark_done(&repository, command).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(EXIT_COMMAND_FAILURE);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::NotFound(s)) => {
            eprintln!("{} {}", "Error:".style(error_style), s);
        }
        Some(CoreError::InvalidInput(s)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), s.yellow());
        }
        Some(CoreError::Database(e)) => {
            eprintln!("{} Database error: {}", "Error:".style(error_style), e);
        }
        Some(CoreError::Migration(e)) => {
            eprintln!("{} Database migration failed: {}", "Error:".style(error_style), e);
        }
        Some(CoreError::Io(e)) => {
            eprintln!("{} {}", "Error:".style(error_style), e);
        }
        None => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}
