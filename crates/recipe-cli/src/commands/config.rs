use recipe_core::query::SortOption;

use crate::cli::ConfigCommands;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => run_config_show(),
        ConfigCommands::Set {
            database,
            default_sort,
            default_limit,
        } => run_config_set(database, default_sort, default_limit),
    }
}

fn run_config_show() -> Result<(), CliError> {
    let config = CliConfig::load().map_err(CliError::Config)?;
    println!("# {}", default_config_path().display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn run_config_set(
    db_path: Option<String>,
    default_sort: Option<SortOption>,
    default_limit: Option<usize>,
) -> Result<(), CliError> {
    if db_path.is_none() && default_sort.is_none() && default_limit.is_none() {
        return Err(CliError::Config(
            "Nothing to set; pass --database, --default-sort or --default-limit".to_string(),
        ));
    }

    let mut config = CliConfig::load().map_err(CliError::Config)?;
    apply_config_changes(&mut config, db_path, default_sort, default_limit);

    let path = config.save().map_err(CliError::Config)?;
    println!("Config saved at {}", path.display());
    Ok(())
}

/// Blank `db_path` and zero `default_limit` clear the stored value.
pub fn apply_config_changes(
    config: &mut CliConfig,
    db_path: Option<String>,
    default_sort: Option<SortOption>,
    default_limit: Option<usize>,
) {
    if let Some(db_path) = db_path {
        config.db_path = Some(db_path);
    }
    if let Some(sort) = default_sort {
        config.default_sort = Some(sort);
    }
    if let Some(limit) = default_limit {
        config.default_limit = Some(limit);
    }
}
