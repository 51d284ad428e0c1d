//! Shared recipe service wrapper used across clients.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::db::{Database, RecipeRepository, SqliteRecipeRepository};
use crate::import::{self, ImportFormat};
use crate::models::{Recipe, RecipeDraft, RecipeId};
use crate::query::{self, CategorySummary, RecipeQuery};
use crate::{Error, Result};

/// Category that recipes fall back to when theirs is deleted.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Thread-safe service combining the gateway with the query engine.
///
/// Every read takes a fresh snapshot of the collection; nothing is cached.
#[derive(Clone)]
pub struct RecipeService {
    db: Arc<Mutex<Database>>,
    db_path: Option<PathBuf>,
}

impl RecipeService {
    /// Open a recipe service at the given filesystem path.
    pub fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let db = Database::open(&db_path)?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: Some(db_path),
        })
    }

    /// Open an in-memory recipe service (primarily for tests).
    pub fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: None,
        })
    }

    /// Database file backing this service, `None` when in memory.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Run one gateway round trip under the database lock.
    fn with_repository<T>(
        &self,
        operation: impl FnOnce(&SqliteRecipeRepository<'_>) -> Result<T>,
    ) -> Result<T> {
        let db = self
            .db
            .lock()
            .map_err(|_| Error::Database("recipe database lock poisoned".to_string()))?;
        let repo = SqliteRecipeRepository::new(db.connection());
        operation(&repo)
    }

    /// Snapshot of every stored recipe.
    pub fn fetch_all(&self) -> Result<Vec<Recipe>> {
        self.with_repository(|repo| repo.fetch_all())
    }

    /// Fetch a recipe by id.
    pub fn get(&self, id: &RecipeId) -> Result<Option<Recipe>> {
        self.with_repository(|repo| repo.get(id))
    }

    /// Create and store a new recipe.
    pub fn add(&self, draft: RecipeDraft) -> Result<Recipe> {
        let recipe = Recipe::new(draft);
        self.with_repository(|repo| repo.insert(&recipe))?;
        tracing::info!("Added recipe {} ({})", recipe.id, recipe.display_title());
        Ok(recipe)
    }

    /// Replace the editable fields of an existing recipe.
    pub fn update(&self, id: &RecipeId, draft: RecipeDraft) -> Result<Recipe> {
        let recipe = self.with_repository(|repo| {
            let mut recipe = repo
                .get(id)?
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            recipe.apply(draft);
            repo.update(&recipe)?;
            Ok(recipe)
        })?;
        tracing::info!("Updated recipe {}", recipe.id);
        Ok(recipe)
    }

    /// Permanently remove a recipe.
    pub fn delete(&self, id: &RecipeId) -> Result<()> {
        self.with_repository(|repo| repo.delete(id))?;
        tracing::info!("Deleted recipe {id}");
        Ok(())
    }

    /// Flip the favorite flag and return the updated recipe.
    pub fn toggle_favorite(&self, id: &RecipeId) -> Result<Recipe> {
        let recipe = self.with_repository(|repo| {
            let current = repo
                .get(id)?
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            repo.set_favorite(id, !current.is_favorite)
        })?;
        tracing::info!(
            "Recipe {} is {} a favorite",
            recipe.id,
            if recipe.is_favorite { "now" } else { "no longer" }
        );
        Ok(recipe)
    }

    /// Parse an external payload and store it as a new recipe.
    pub fn import(&self, payload: &[u8], format: ImportFormat) -> Result<Recipe> {
        let recipe = import::parse(payload, format)?;
        self.with_repository(|repo| repo.insert(&recipe))?;
        tracing::info!("Imported recipe {} ({})", recipe.id, recipe.display_title());
        Ok(recipe)
    }

    /// Run the query engine over a fresh snapshot.
    pub fn query(&self, params: &RecipeQuery) -> Result<Vec<Recipe>> {
        let recipes = self.fetch_all()?;
        Ok(query::query(&recipes, params))
    }

    /// Favorite recipes, most recently modified first.
    pub fn favorites(&self, search_text: &str) -> Result<Vec<Recipe>> {
        let recipes = self.fetch_all()?;
        Ok(query::favorites(&recipes, search_text))
    }

    /// Categories currently referenced by at least one recipe.
    pub fn categories(&self) -> Result<Vec<String>> {
        let recipes = self.fetch_all()?;
        Ok(query::distinct_categories(&recipes))
    }

    /// Categories with their recipe counts.
    pub fn category_summaries(&self) -> Result<Vec<CategorySummary>> {
        let recipes = self.fetch_all()?;
        Ok(query::category_summaries(&recipes))
    }

    /// Number of recipes in exactly this category.
    pub fn recipe_count_for_category(&self, category: &str) -> Result<usize> {
        let recipes = self.fetch_all()?;
        Ok(query::recipe_count_for_category(&recipes, category))
    }

    /// Move every recipe of `category` to [`UNCATEGORIZED`].
    ///
    /// Returns the number of recipes moved. Deleting `Uncategorized` itself
    /// is rejected.
    pub fn delete_category(&self, category: &str) -> Result<usize> {
        if category == UNCATEGORIZED {
            return Err(Error::InvalidInput(format!(
                "'{UNCATEGORIZED}' cannot be deleted"
            )));
        }

        let moved = self.with_repository(|repo| repo.reassign_category(category, UNCATEGORIZED))?;
        if moved == 0 {
            return Err(Error::NotFound(format!("category '{category}'")));
        }
        tracing::info!("Deleted category '{category}', moved {moved} recipe(s) to {UNCATEGORIZED}");
        Ok(moved)
    }

    /// Recipe ids starting with `prefix`.
    pub fn list_ids_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        self.with_repository(|repo| repo.list_ids_by_prefix(prefix, limit))
    }
}
