use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use chrono::Utc;
use recipe_core::services::RecipeService;
use recipe_core::{Recipe, RecipeDraft, RecipeId};
use serde::Serialize;

use crate::cli::RecipeFieldArgs;
use crate::config::{default_data_dir, CliConfig};
use crate::error::CliError;

const SHORT_ID_LEN: usize = 13;

#[derive(Debug, Serialize)]
pub struct RecipeListItem {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub cooking_time: u32,
    pub prep_time: u32,
    pub total_time: u32,
    pub servings: u32,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub date_created: Option<i64>,
    pub date_modified: Option<i64>,
    pub relative_time: String,
}

pub fn open_service(db_path: &Path) -> Result<RecipeService, CliError> {
    Ok(RecipeService::open_path(db_path)?)
}

pub fn resolve_recipe(recipe_query: &str, service: &RecipeService) -> Result<Recipe, CliError> {
    if let Ok(recipe_id) = recipe_query.parse::<RecipeId>() {
        if let Some(recipe) = service.get(&recipe_id)? {
            return Ok(recipe);
        }
    }

    let matching_ids = service.list_ids_by_prefix(recipe_query, 3)?;

    match matching_ids.as_slice() {
        [] => Err(CliError::RecipeNotFound(recipe_query.to_string())),
        [only] => {
            let resolved_id = only
                .parse::<RecipeId>()
                .map_err(|_| CliError::RecipeNotFound(recipe_query.to_string()))?;
            service
                .get(&resolved_id)?
                .ok_or_else(|| CliError::RecipeNotFound(recipe_query.to_string()))
        }
        _ => {
            let options = matching_ids
                .iter()
                .map(|id| short_id(id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousRecipeId(format!(
                "ID prefix '{recipe_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn normalize_recipe_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyRecipeId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Overlay the flags that were given onto `base`.
///
/// Repeated `--ingredient`/`--step` values become one line each.
pub fn apply_field_args(fields: &RecipeFieldArgs, mut base: RecipeDraft) -> RecipeDraft {
    if let Some(title) = &fields.title {
        base.title = Some(title.trim().to_string());
    }
    if let Some(ingredients) = join_lines(&fields.ingredients) {
        base.ingredients = Some(ingredients);
    }
    if let Some(instructions) = join_lines(&fields.steps) {
        base.instructions = Some(instructions);
    }
    if let Some(category) = &fields.category {
        base.category = Some(category.trim().to_string());
    }
    if let Some(difficulty) = &fields.difficulty {
        base.difficulty = Some(difficulty.clone());
    }
    if let Some(cooking_time) = fields.cooking_time {
        base.cooking_time = cooking_time;
    }
    if let Some(prep_time) = fields.prep_time {
        base.prep_time = prep_time;
    }
    if let Some(servings) = fields.servings {
        base.servings = servings;
    }
    if let Some(notes) = &fields.notes {
        base.notes = Some(notes.clone());
    }
    if let Some(tags) = &fields.tags {
        base.tags = Some(tags.clone());
    }
    base
}

/// Reject drafts the recipe form would not accept
pub fn ensure_complete(draft: &RecipeDraft) -> Result<(), CliError> {
    let missing = draft.missing_required_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CliError::IncompleteRecipe(missing.join(", ")))
    }
}

pub fn join_lines(lines: &[String]) -> Option<String> {
    let kept = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join("\n"))
    }
}

pub fn format_recipe_lines(recipes: &[Recipe]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    recipes
        .iter()
        .map(|recipe| {
            let id = recipe.id.to_string();
            let marker = if recipe.is_favorite { "★" } else { " " };
            let title = title_preview(recipe, 32);
            let category = recipe.category.as_deref().unwrap_or("-");
            let difficulty = recipe.difficulty.as_deref().unwrap_or("-");
            let minutes = format!("{}m", recipe.total_time);
            let relative_time = recipe
                .date_created
                .map_or_else(String::new, |date| {
                    format_relative_time(date.timestamp_millis(), now_ms)
                });

            format!(
                "{short_id:<13} {marker} {title:<32}  {category:<14}  {difficulty:<6}  {minutes:>5}  {relative_time}",
                short_id = short_id(&id)
            )
        })
        .collect()
}

pub fn recipe_to_list_item(recipe: &Recipe) -> RecipeListItem {
    let now_ms = Utc::now().timestamp_millis();

    RecipeListItem {
        id: recipe.id.to_string(),
        title: recipe.display_title().to_string(),
        category: recipe.category.clone(),
        difficulty: recipe.difficulty.clone(),
        cooking_time: recipe.cooking_time,
        prep_time: recipe.prep_time,
        total_time: recipe.total_time,
        servings: recipe.servings,
        tags: recipe.tag_list(),
        is_favorite: recipe.is_favorite,
        date_created: recipe.date_created.map(|date| date.timestamp_millis()),
        date_modified: recipe.date_modified.map(|date| date.timestamp_millis()),
        relative_time: recipe.date_created.map_or_else(String::new, |date| {
            format_relative_time(date.timestamp_millis(), now_ms)
        }),
    }
}

pub fn title_preview(recipe: &Recipe, max_chars: usize) -> String {
    let collapsed = recipe
        .display_title()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Raw bytes from stdin, or `None` when stdin is a terminal
pub fn read_piped_stdin() -> Result<Option<Vec<u8>>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    stdin.lock().read_to_end(&mut buffer)?;
    Ok(Some(buffer))
}

/// `--db-path`, then `RECIPES_DB_PATH`, then the config file, then the data dir
pub fn resolve_db_path(cli_db_path: Option<PathBuf>, config: &CliConfig) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("RECIPES_DB_PATH").map(PathBuf::from))
        .or_else(|| config.db_path())
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    default_data_dir().join("recipes.db")
}
