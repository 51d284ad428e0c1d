use std::path::Path;

use recipe_core::query::{self, RecipeQuery, ALL};
use recipe_core::services::RecipeService;
use recipe_core::Recipe;

use crate::cli::ListArgs;
use crate::commands::common::{
    format_recipe_lines, open_service, recipe_to_list_item, RecipeListItem,
};
use crate::config::CliConfig;
use crate::error::CliError;

pub fn run_list(args: &ListArgs, config: &CliConfig, db_path: &Path) -> Result<(), CliError> {
    let service = open_service(db_path)?;
    let recipes = select_recipes(args, config, &service)?;

    if args.json {
        let json_items = recipes
            .iter()
            .map(recipe_to_list_item)
            .collect::<Vec<RecipeListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_recipe_lines(&recipes) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Run the query engine with flags falling back to config defaults.
///
/// `--favorites` narrows the snapshot before filtering and sorting.
pub fn select_recipes(
    args: &ListArgs,
    config: &CliConfig,
    service: &RecipeService,
) -> Result<Vec<Recipe>, CliError> {
    let params = query_from_args(args, config);
    let snapshot = if args.favorites {
        service.favorites("")?
    } else {
        service.fetch_all()?
    };

    let mut recipes = query::query(&snapshot, &params);
    if let Some(limit) = args.limit.or(config.default_limit) {
        recipes.truncate(limit);
    }
    Ok(recipes)
}

pub fn query_from_args(args: &ListArgs, config: &CliConfig) -> RecipeQuery {
    RecipeQuery::default()
        .with_search(args.search.as_deref().map_or("", str::trim))
        .with_category(args.category.as_deref().unwrap_or(ALL))
        .with_difficulty(args.difficulty.as_deref().unwrap_or(ALL))
        .sorted_by(args.sort.or(config.default_sort).unwrap_or_default())
}
