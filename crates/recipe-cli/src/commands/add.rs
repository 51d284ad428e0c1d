use std::path::Path;

use recipe_core::RecipeDraft;

use crate::cli::RecipeFieldArgs;
use crate::commands::common::{apply_field_args, ensure_complete, open_service};
use crate::error::CliError;

pub fn run_add(fields: &RecipeFieldArgs, db_path: &Path) -> Result<(), CliError> {
    let draft = apply_field_args(fields, RecipeDraft::default());
    ensure_complete(&draft)?;

    let service = open_service(db_path)?;
    let recipe = service.add(draft)?;

    println!("{}", recipe.id);
    Ok(())
}
