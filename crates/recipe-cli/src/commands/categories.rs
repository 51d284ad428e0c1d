use std::path::Path;

use recipe_core::query::fixed_difficulties;
use recipe_core::services::UNCATEGORIZED;

use crate::cli::CategoryCommands;
use crate::commands::common::open_service;
use crate::error::CliError;

pub fn run_categories(
    command: Option<CategoryCommands>,
    as_json: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let service = open_service(db_path)?;

    match command {
        Some(CategoryCommands::Delete { name }) => {
            let moved = service.delete_category(&name)?;
            println!("Moved {moved} recipe(s) from '{name}' to '{UNCATEGORIZED}'");
        }
        None => {
            let summaries = service.category_summaries()?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for summary in summaries {
                    println!("{:<24}  {}", summary.name, summary.recipe_count);
                }
            }
        }
    }

    Ok(())
}

pub fn run_difficulties() {
    for difficulty in fixed_difficulties() {
        println!("{difficulty}");
    }
}
