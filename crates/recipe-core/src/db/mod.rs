//! Database layer for Recipe Circle

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{RecipeRepository, SqliteRecipeRepository};
