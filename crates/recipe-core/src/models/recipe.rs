//! Recipe model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title shown when a recipe has none.
pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

/// Servings assumed when a record does not carry a value.
pub const DEFAULT_SERVINGS: u32 = 1;

/// A unique identifier for a recipe, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Create a new unique recipe ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The user-editable part of a recipe.
///
/// Used for both the add and the update path; the write path owns the id,
/// the timestamps and the derived total time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    /// Cooking time in minutes
    pub cooking_time: u32,
    /// Preparation time in minutes
    pub prep_time: u32,
    pub servings: u32,
    pub notes: Option<String>,
    /// Comma-separated labels, stored as entered
    pub tags: Option<String>,
    #[serde(skip)]
    pub image_data: Option<Vec<u8>>,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            title: None,
            ingredients: None,
            instructions: None,
            category: None,
            difficulty: None,
            cooking_time: 0,
            prep_time: 0,
            servings: DEFAULT_SERVINGS,
            notes: None,
            tags: None,
            image_data: None,
        }
    }
}

impl RecipeDraft {
    /// Start a draft with only a title set
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Names of the fields a complete recipe needs but this draft lacks.
    ///
    /// Title, ingredients, instructions and category must be non-empty.
    /// The data layer never enforces this; front ends do.
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("ingredients", &self.ingredients),
            ("instructions", &self.instructions),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }
}

impl From<&Recipe> for RecipeDraft {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            category: recipe.category.clone(),
            difficulty: recipe.difficulty.clone(),
            cooking_time: recipe.cooking_time,
            prep_time: recipe.prep_time,
            servings: recipe.servings,
            notes: recipe.notes.clone(),
            tags: recipe.tags.clone(),
            image_data: recipe.image_data.clone(),
        }
    }
}

/// A recipe in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: RecipeId,
    pub title: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    /// Cooking time in minutes
    pub cooking_time: u32,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// `cooking_time + prep_time` as of the last write through `new`/`apply`
    pub total_time: u32,
    pub servings: u32,
    pub notes: Option<String>,
    /// Comma-separated labels, stored as entered
    pub tags: Option<String>,
    #[serde(skip)]
    pub image_data: Option<Vec<u8>>,
    pub is_favorite: bool,
    pub date_created: Option<DateTime<Utc>>,
    pub date_modified: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Create a new recipe from a draft, assigning its id and timestamps
    #[must_use]
    pub fn new(draft: RecipeDraft) -> Self {
        let now = Utc::now();
        let mut recipe = Self {
            id: RecipeId::new(),
            title: None,
            ingredients: None,
            instructions: None,
            category: None,
            difficulty: None,
            cooking_time: 0,
            prep_time: 0,
            total_time: 0,
            servings: DEFAULT_SERVINGS,
            notes: None,
            tags: None,
            image_data: None,
            is_favorite: false,
            date_created: Some(now),
            date_modified: Some(now),
        };
        recipe.write_draft(draft);
        recipe
    }

    /// Replace the editable fields, keeping id, creation date and favorite flag
    pub fn apply(&mut self, draft: RecipeDraft) {
        self.write_draft(draft);
        self.date_modified = Some(Utc::now());
    }

    /// Mark or unmark as favorite
    pub fn set_favorite(&mut self, is_favorite: bool) {
        self.is_favorite = is_favorite;
        self.date_modified = Some(Utc::now());
    }

    fn write_draft(&mut self, draft: RecipeDraft) {
        self.title = draft.title;
        self.ingredients = draft.ingredients;
        self.instructions = draft.instructions;
        self.category = draft.category;
        self.difficulty = draft.difficulty;
        self.cooking_time = draft.cooking_time;
        self.prep_time = draft.prep_time;
        self.total_time = draft.cooking_time.saturating_add(draft.prep_time);
        self.servings = draft.servings;
        self.notes = draft.notes;
        self.tags = draft.tags;
        self.image_data = draft.image_data;
    }

    /// Title, or the untitled placeholder
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED_RECIPE)
    }

    /// Tags split on commas and trimmed, empty labels dropped
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}
