use std::borrow::Cow;
use std::path::Path;

use recipe_core::export::{format, render_message_text, suggested_export_file_name, ExportTarget};

use crate::cli::ExportFormat;
use crate::commands::common::{normalize_recipe_identifier, open_service, resolve_recipe};
use crate::error::CliError;

pub fn run_export(
    id: &str,
    export_format: ExportFormat,
    output_path: Option<&Path>,
    db_path: &Path,
) -> Result<(), CliError> {
    let normalized_id = normalize_recipe_identifier(id)?;
    let service = open_service(db_path)?;
    let recipe = resolve_recipe(&normalized_id, &service)?;

    let rendered = match export_format.target() {
        Some(target) => format(&recipe, target)?,
        None => render_message_text(&recipe),
    };

    if let Some(path) = output_path {
        // A directory gets a file named after the recipe
        let path = if path.is_dir() {
            let target = export_format.target().unwrap_or(ExportTarget::PlainText);
            Cow::Owned(path.join(suggested_export_file_name(&recipe, target)))
        } else {
            Cow::Borrowed(path)
        };
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
