//! Shared services used by front ends.

mod recipes;

pub use recipes::{RecipeService, UNCATEGORIZED};
