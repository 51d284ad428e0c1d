//! Recipe filtering and sorting
//!
//! Everything here is a pure function over a borrowed snapshot of the
//! collection. Callers own the filter state and decide when to re-run.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Recipe;
use crate::util::contains_ignore_case;

/// Filter value that disables the category or difficulty filter.
pub const ALL: &str = "All";

const DIFFICULTIES: [&str; 3] = ["Easy", "Medium", "Hard"];

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Newest first
    #[default]
    DateCreated,
    /// A to Z, case-sensitive
    Title,
    /// Shortest first
    CookingTime,
    /// Raw difficulty label, A to Z
    Difficulty,
}

impl SortOption {
    pub const ALL: [Self; 4] = [
        Self::DateCreated,
        Self::Title,
        Self::CookingTime,
        Self::Difficulty,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DateCreated => "Date Created",
            Self::Title => "Title",
            Self::CookingTime => "Cooking Time",
            Self::Difficulty => "Difficulty",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::DateCreated => "date_created",
            Self::Title => "title",
            Self::CookingTime => "cooking_time",
            Self::Difficulty => "difficulty",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOption {
    type Err = String;

    /// Accepts the snake-case key or the display label, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|option| {
                option.key().eq_ignore_ascii_case(wanted)
                    || option.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown sort option '{wanted}'"))
    }
}

/// Filter and sort parameters for [`query`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeQuery {
    /// Case-insensitive match on title, ingredients or instructions; empty keeps all
    pub search_text: String,
    /// Exact category, or [`ALL`]
    pub category: String,
    /// Exact difficulty, or [`ALL`]
    pub difficulty: String,
    pub sort: SortOption,
}

impl Default for RecipeQuery {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: ALL.to_string(),
            difficulty: ALL.to_string(),
            sort: SortOption::default(),
        }
    }
}

impl RecipeQuery {
    #[must_use]
    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    #[must_use]
    pub const fn sorted_by(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    fn matches(&self, recipe: &Recipe, search_lowercase: &str) -> bool {
        matches_search(recipe, search_lowercase)
            && matches_label(recipe.category.as_deref(), &self.category)
            && matches_label(recipe.difficulty.as_deref(), &self.difficulty)
    }
}

/// A category together with the number of recipes filed under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub recipe_count: usize,
}

/// Filter then sort a recipe collection.
///
/// Filters are ANDed. The sort is stable, so ties keep input order.
#[must_use]
pub fn query(recipes: &[Recipe], params: &RecipeQuery) -> Vec<Recipe> {
    let search_lowercase = params.search_text.to_lowercase();
    let mut result = recipes
        .iter()
        .filter(|recipe| params.matches(recipe, &search_lowercase))
        .cloned()
        .collect::<Vec<_>>();

    sort_recipes(&mut result, params.sort);
    result
}

/// Stable in-place sort by the given option
pub fn sort_recipes(recipes: &mut [Recipe], sort: SortOption) {
    match sort {
        // `None < Some(_)`, so undated recipes land last
        SortOption::DateCreated => recipes.sort_by(|a, b| b.date_created.cmp(&a.date_created)),
        SortOption::Title => recipes.sort_by(|a, b| {
            let left = a.title.as_deref().unwrap_or("");
            let right = b.title.as_deref().unwrap_or("");
            left.cmp(right)
        }),
        SortOption::CookingTime => recipes.sort_by_key(|recipe| recipe.cooking_time),
        SortOption::Difficulty => recipes.sort_by(|a, b| {
            let left = a.difficulty.as_deref().unwrap_or("");
            let right = b.difficulty.as_deref().unwrap_or("");
            left.cmp(right)
        }),
    }
}

/// Non-empty categories in use, deduplicated and ascending
#[must_use]
pub fn distinct_categories(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .filter_map(|recipe| recipe.category.as_deref())
        .filter(|category| !category.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// The difficulty choices offered to users.
///
/// Fixed, unlike categories: never derived from stored data.
#[must_use]
pub const fn fixed_difficulties() -> [&'static str; 3] {
    DIFFICULTIES
}

/// Number of recipes whose category is exactly `category`
#[must_use]
pub fn recipe_count_for_category(recipes: &[Recipe], category: &str) -> usize {
    recipes
        .iter()
        .filter(|recipe| recipe.category.as_deref() == Some(category))
        .count()
}

/// Distinct categories with their recipe counts
#[must_use]
pub fn category_summaries(recipes: &[Recipe]) -> Vec<CategorySummary> {
    distinct_categories(recipes)
        .into_iter()
        .map(|name| {
            let recipe_count = recipe_count_for_category(recipes, &name);
            CategorySummary { name, recipe_count }
        })
        .collect()
}

/// Favorite recipes, most recently modified first, narrowed by search text
#[must_use]
pub fn favorites(recipes: &[Recipe], search_text: &str) -> Vec<Recipe> {
    let search_lowercase = search_text.to_lowercase();
    let mut result = recipes
        .iter()
        .filter(|recipe| recipe.is_favorite)
        .filter(|recipe| matches_search(recipe, &search_lowercase))
        .cloned()
        .collect::<Vec<_>>();

    result.sort_by(|a, b| b.date_modified.cmp(&a.date_modified));
    result
}

fn matches_search(recipe: &Recipe, search_lowercase: &str) -> bool {
    if search_lowercase.is_empty() {
        return true;
    }

    [&recipe.title, &recipe.ingredients, &recipe.instructions]
        .into_iter()
        .filter_map(Option::as_deref)
        .any(|field| contains_ignore_case(field, search_lowercase))
}

fn matches_label(value: Option<&str>, wanted: &str) -> bool {
    wanted == ALL || value == Some(wanted)
}
