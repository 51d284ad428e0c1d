//! Recipe repository implementation

#![allow(clippy::cast_possible_wrap)] // SQLite uses i64 for LIMIT

use crate::error::{Error, Result};
use crate::models::{Recipe, RecipeId};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

const RECIPE_COLUMNS: &str = "id, title, ingredients, instructions, category, difficulty,
    cooking_time, prep_time, total_time, servings, notes, tags, image_data,
    is_favorite, date_created, date_modified";

/// Trait for recipe storage operations
pub trait RecipeRepository {
    /// Every stored recipe, in storage order
    fn fetch_all(&self) -> Result<Vec<Recipe>>;

    /// Get a recipe by ID
    fn get(&self, id: &RecipeId) -> Result<Option<Recipe>>;

    /// Store a new recipe exactly as given
    fn insert(&self, recipe: &Recipe) -> Result<()>;

    /// Overwrite the stored record with the same id
    fn update(&self, recipe: &Recipe) -> Result<()>;

    /// Remove a recipe permanently
    fn delete(&self, id: &RecipeId) -> Result<()>;

    /// Set the favorite flag and return the updated record
    fn set_favorite(&self, id: &RecipeId, is_favorite: bool) -> Result<Recipe>;

    /// Move every recipe in `from` to `to`, returning how many moved
    fn reassign_category(&self, from: &str, to: &str) -> Result<usize>;

    /// IDs starting with `prefix`, at most `limit` of them
    fn list_ids_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>>;
}

/// `SQLite` implementation of `RecipeRepository`
pub struct SqliteRecipeRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteRecipeRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a recipe from a database row selected with `RECIPE_COLUMNS`
    fn parse_recipe(row: &rusqlite::Row<'_>) -> rusqlite::Result<Recipe> {
        let id: String = row.get(0)?;
        let id: RecipeId = id.parse().map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
        })?;
        Ok(Recipe {
            id,
            title: row.get(1)?,
            ingredients: row.get(2)?,
            instructions: row.get(3)?,
            category: row.get(4)?,
            difficulty: row.get(5)?,
            cooking_time: row.get(6)?,
            prep_time: row.get(7)?,
            total_time: row.get(8)?,
            servings: row.get(9)?,
            notes: row.get(10)?,
            tags: row.get(11)?,
            image_data: row.get(12)?,
            is_favorite: row.get::<_, i32>(13)? != 0,
            date_created: from_millis(row.get(14)?),
            date_modified: from_millis(row.get(15)?),
        })
    }
}

fn to_millis(date: Option<DateTime<Utc>>) -> Option<i64> {
    date.map(|date| date.timestamp_millis())
}

fn from_millis(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(DateTime::from_timestamp_millis)
}

/// Escape `LIKE` wildcards so the prefix matches literally
fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl RecipeRepository for SqliteRecipeRepository<'_> {
    fn fetch_all(&self) -> Result<Vec<Recipe>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY rowid"))?;

        let recipes = stmt
            .query_map([], Self::parse_recipe)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(recipes)
    }

    fn get(&self, id: &RecipeId) -> Result<Option<Recipe>> {
        let result = self.conn.query_row(
            &format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?"),
            params![id.as_str()],
            Self::parse_recipe,
        );

        match result {
            Ok(recipe) => Ok(Some(recipe)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn insert(&self, recipe: &Recipe) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO recipes ({RECIPE_COLUMNS})
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            params![
                recipe.id.as_str(),
                recipe.title,
                recipe.ingredients,
                recipe.instructions,
                recipe.category,
                recipe.difficulty,
                recipe.cooking_time,
                recipe.prep_time,
                recipe.total_time,
                recipe.servings,
                recipe.notes,
                recipe.tags,
                recipe.image_data,
                i32::from(recipe.is_favorite),
                to_millis(recipe.date_created),
                to_millis(recipe.date_modified),
            ],
        )?;

        tracing::debug!("Inserted recipe {}", recipe.id);
        Ok(())
    }

    fn update(&self, recipe: &Recipe) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE recipes SET
                title = ?, ingredients = ?, instructions = ?, category = ?,
                difficulty = ?, cooking_time = ?, prep_time = ?, total_time = ?,
                servings = ?, notes = ?, tags = ?, image_data = ?, is_favorite = ?,
                date_created = ?, date_modified = ?
             WHERE id = ?",
            params![
                recipe.title,
                recipe.ingredients,
                recipe.instructions,
                recipe.category,
                recipe.difficulty,
                recipe.cooking_time,
                recipe.prep_time,
                recipe.total_time,
                recipe.servings,
                recipe.notes,
                recipe.tags,
                recipe.image_data,
                i32::from(recipe.is_favorite),
                to_millis(recipe.date_created),
                to_millis(recipe.date_modified),
                recipe.id.as_str(),
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(recipe.id.to_string()));
        }

        tracing::debug!("Updated recipe {}", recipe.id);
        Ok(())
    }

    fn delete(&self, id: &RecipeId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM recipes WHERE id = ?", params![id.as_str()])?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        tracing::debug!("Deleted recipe {id}");
        Ok(())
    }

    fn set_favorite(&self, id: &RecipeId, is_favorite: bool) -> Result<Recipe> {
        let mut recipe = self
            .get(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        recipe.set_favorite(is_favorite);
        self.conn.execute(
            "UPDATE recipes SET is_favorite = ?, date_modified = ? WHERE id = ?",
            params![
                i32::from(recipe.is_favorite),
                to_millis(recipe.date_modified),
                id.as_str()
            ],
        )?;

        tracing::debug!("Set favorite={is_favorite} on recipe {id}");
        Ok(recipe)
    }

    fn reassign_category(&self, from: &str, to: &str) -> Result<usize> {
        let now = Utc::now().timestamp_millis();

        let rows = self.conn.execute(
            "UPDATE recipes SET category = ?, date_modified = ? WHERE category = ?",
            params![to, now, from],
        )?;

        tracing::debug!("Moved {rows} recipe(s) from category '{from}' to '{to}'");
        Ok(rows)
    }

    fn list_ids_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT id FROM recipes
             WHERE id LIKE ? ESCAPE '\\'
             ORDER BY id
             LIMIT ?",
        )?;

        let ids = stmt
            .query_map(
                params![like_prefix_pattern(prefix), limit as i64],
                |row| row.get::<_, String>(0),
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(ids)
    }
}
