//! Recipe Circle CLI - manage a personal recipe collection from the terminal
//!
//! Add, browse, search and share recipes stored in a local `SQLite` file.

mod cli;
mod commands;
mod config;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::categories::{run_categories, run_difficulties};
use crate::commands::common::resolve_db_path;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::favorite::run_favorite;
use crate::commands::import::run_import;
use crate::commands::list::run_list;
use crate::commands::show::run_show;
use crate::config::CliConfig;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "recipes=info,recipe_core=info";

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Commands that never touch the database
    let command = match cli.command {
        Commands::Completions { shell, output } => {
            return run_completions(shell, output.as_deref());
        }
        Commands::Config { command } => return run_config(command),
        Commands::Difficulties => {
            run_difficulties();
            return Ok(());
        }
        command => command,
    };

    let config = CliConfig::load().map_err(CliError::Config)?;
    let db_path = resolve_db_path(cli.db_path, &config);
    tracing::debug!("Using recipe database at {}", db_path.display());

    match command {
        Commands::Add(fields) => run_add(&fields, &db_path)?,
        Commands::Edit { id, fields } => run_edit(&id, &fields, &db_path)?,
        Commands::List(args) => run_list(&args, &config, &db_path)?,
        Commands::Show { id } => run_show(&id, &db_path)?,
        Commands::Delete { id } => run_delete(&id, &db_path)?,
        Commands::Favorite { id } => run_favorite(&id, &db_path)?,
        Commands::Categories { command, json } => run_categories(command, json, &db_path)?,
        Commands::Export { id, format, output } => {
            run_export(&id, format, output.as_deref(), &db_path)?;
        }
        Commands::Import { path, format } => run_import(path.as_deref(), format, &db_path)?,
        Commands::Completions { .. } | Commands::Config { .. } | Commands::Difficulties => {}
    }

    Ok(())
}
