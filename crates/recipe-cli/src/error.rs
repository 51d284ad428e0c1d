use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] recipe_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Recipe is missing required fields: {0}")]
    IncompleteRecipe(String),
    #[error("Recipe ID cannot be empty")]
    EmptyRecipeId,
    #[error("Recipe not found for id/prefix: {0}")]
    RecipeNotFound(String),
    #[error("{0}")]
    AmbiguousRecipeId(String),
    #[error("No import payload provided; pass a file path or pipe data on stdin")]
    EmptyImport,
    #[error("Configuration error: {0}")]
    Config(String),
}
