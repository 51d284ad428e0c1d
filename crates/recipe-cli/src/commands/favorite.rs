use std::path::Path;

use crate::commands::common::{normalize_recipe_identifier, open_service, resolve_recipe};
use crate::error::CliError;

pub fn run_favorite(id: &str, db_path: &Path) -> Result<(), CliError> {
    let normalized_id = normalize_recipe_identifier(id)?;
    let service = open_service(db_path)?;
    let recipe = resolve_recipe(&normalized_id, &service)?;

    let updated = service.toggle_favorite(&recipe.id)?;
    let state = if updated.is_favorite {
        "favorited"
    } else {
        "unfavorited"
    };
    println!("{} {state}", updated.id);
    Ok(())
}
