use std::path::Path;

use recipe_core::export::render_detail_text;

use crate::commands::common::{normalize_recipe_identifier, open_service, resolve_recipe};
use crate::error::CliError;

pub fn run_show(id: &str, db_path: &Path) -> Result<(), CliError> {
    print!("{}", show_text(id, db_path)?);
    Ok(())
}

/// Detail view of the recipe matching `id` or a unique id prefix
pub fn show_text(id: &str, db_path: &Path) -> Result<String, CliError> {
    let normalized_id = normalize_recipe_identifier(id)?;
    let service = open_service(db_path)?;
    let recipe = resolve_recipe(&normalized_id, &service)?;
    Ok(render_detail_text(&recipe))
}
