use std::path::Path;

use crate::cli::ImportFormatArg;
use crate::commands::common::{open_service, read_piped_stdin};
use crate::error::CliError;

pub fn run_import(
    input_path: Option<&Path>,
    format: ImportFormatArg,
    db_path: &Path,
) -> Result<(), CliError> {
    let payload = match input_path {
        Some(path) => std::fs::read(path)?,
        None => read_piped_stdin()?.ok_or(CliError::EmptyImport)?,
    };

    let service = open_service(db_path)?;
    let recipe = service.import(&payload, format.into())?;

    println!("{}", recipe.id);
    Ok(())
}
