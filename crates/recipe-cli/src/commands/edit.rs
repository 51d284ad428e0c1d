use std::path::Path;

use recipe_core::RecipeDraft;

use crate::cli::RecipeFieldArgs;
use crate::commands::common::{
    apply_field_args, ensure_complete, normalize_recipe_identifier, open_service, resolve_recipe,
};
use crate::error::CliError;

pub fn run_edit(id: &str, fields: &RecipeFieldArgs, db_path: &Path) -> Result<(), CliError> {
    let normalized_id = normalize_recipe_identifier(id)?;
    let service = open_service(db_path)?;
    let recipe = resolve_recipe(&normalized_id, &service)?;

    let current = RecipeDraft::from(&recipe);
    let draft = apply_field_args(fields, current.clone());
    if draft == current {
        println!("{}", recipe.id);
        return Ok(());
    }
    ensure_complete(&draft)?;

    let updated = service.update(&recipe.id, draft)?;
    println!("{}", updated.id);
    Ok(())
}
