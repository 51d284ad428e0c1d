//! recipe-core - Core library for Recipe Circle
//!
//! This crate contains the recipe model, the query engine, import and export
//! formats, and the `SQLite` storage layer used by every Recipe Circle front end.

pub mod db;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod query;
pub mod services;
pub mod util;

pub use error::{Error, Result};
pub use models::{Recipe, RecipeDraft, RecipeId};
