//! Error types for recipe-core

use thiserror::Error;

use crate::import::ParseFailure;

/// Result type alias using recipe-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in recipe-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Recipe not found
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Import payload could not be turned into a recipe
    #[error("Import failed: {0}")]
    Import(#[from] ParseFailure),
}
