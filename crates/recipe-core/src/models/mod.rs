//! Data models for Recipe Circle

mod recipe;

pub use recipe::{Recipe, RecipeDraft, RecipeId, DEFAULT_SERVINGS, UNTITLED_RECIPE};
