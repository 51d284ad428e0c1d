use std::path::Path;

use crate::commands::common::{normalize_recipe_identifier, open_service, resolve_recipe};
use crate::error::CliError;

pub fn run_delete(id: &str, db_path: &Path) -> Result<(), CliError> {
    let normalized_id = normalize_recipe_identifier(id)?;
    let service = open_service(db_path)?;
    let recipe = resolve_recipe(&normalized_id, &service)?;

    service.delete(&recipe.id)?;
    println!("{}", recipe.id);
    Ok(())
}
