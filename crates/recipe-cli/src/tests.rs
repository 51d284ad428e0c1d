use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use pretty_assertions::assert_eq;
use recipe_core::query::SortOption;
use recipe_core::services::{RecipeService, UNCATEGORIZED};
use recipe_core::{Recipe, RecipeDraft};
use tempfile::TempDir;

use crate::cli::{
    Cli, Commands, CompletionShell, ExportFormat, ImportFormatArg, ListArgs, RecipeFieldArgs,
};
use crate::commands::add::run_add;
use crate::commands::categories::run_categories;
use crate::commands::common::{
    apply_field_args, ensure_complete, format_recipe_lines, format_relative_time, join_lines,
    normalize_recipe_identifier, recipe_to_list_item, resolve_db_path, resolve_recipe,
    title_preview,
};
use crate::commands::completions::{completion_script, run_completions};
use crate::commands::config::apply_config_changes;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::favorite::run_favorite;
use crate::commands::import::run_import;
use crate::commands::list::{query_from_args, select_recipes};
use crate::commands::show::show_text;
use crate::config::CliConfig;
use crate::error::CliError;

fn test_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("recipes.db");
    (dir, db_path)
}

fn complete_fields(title: &str) -> RecipeFieldArgs {
    RecipeFieldArgs {
        title: Some(title.to_string()),
        ingredients: vec!["2 eggs".to_string(), "1 cup flour".to_string()],
        steps: vec!["Whisk".to_string(), "Bake".to_string()],
        category: Some("Dessert".to_string()),
        difficulty: Some("Easy".to_string()),
        cooking_time: Some(20),
        prep_time: Some(10),
        ..RecipeFieldArgs::default()
    }
}

fn seed(db_path: &Path, title: &str, category: &str, cooking_time: u32) -> Recipe {
    let service = RecipeService::open_path(db_path).unwrap();
    service
        .add(RecipeDraft {
            ingredients: Some("water".to_string()),
            instructions: Some("Boil".to_string()),
            category: Some(category.to_string()),
            cooking_time,
            ..RecipeDraft::titled(title)
        })
        .unwrap()
}

fn titles(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(Recipe::display_title).collect()
}

#[test]
fn join_lines_trims_and_skips_blank_lines() {
    let lines = vec![" eggs ".to_string(), "  ".to_string(), "milk".to_string()];
    assert_eq!(join_lines(&lines), Some("eggs\nmilk".to_string()));
    assert_eq!(join_lines(&[]), None);
}

#[test]
fn apply_field_args_only_overrides_given_fields() {
    let base = RecipeDraft {
        notes: Some("keep me".to_string()),
        servings: 6,
        ..RecipeDraft::titled("Old title")
    };
    let fields = RecipeFieldArgs {
        title: Some("  New title ".to_string()),
        steps: vec!["Stir".to_string()],
        ..RecipeFieldArgs::default()
    };

    let draft = apply_field_args(&fields, base);
    assert_eq!(draft.title.as_deref(), Some("New title"));
    assert_eq!(draft.instructions.as_deref(), Some("Stir"));
    assert_eq!(draft.notes.as_deref(), Some("keep me"));
    assert_eq!(draft.servings, 6);
}

#[test]
fn ensure_complete_lists_missing_fields() {
    let error = ensure_complete(&RecipeDraft::titled("Toast")).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Recipe is missing required fields: ingredients, instructions, category"
    );

    let draft = apply_field_args(&complete_fields("Cake"), RecipeDraft::default());
    assert!(ensure_complete(&draft).is_ok());
}

#[test]
fn normalize_recipe_identifier_rejects_blank() {
    assert!(matches!(
        normalize_recipe_identifier("   "),
        Err(CliError::EmptyRecipeId)
    ));
    assert_eq!(normalize_recipe_identifier(" abc ").unwrap(), "abc");
}

#[test]
fn format_relative_time_units() {
    let now = 10_000_000_000;
    assert_eq!(format_relative_time(now - 30_000, now), "just now");
    assert_eq!(format_relative_time(now - 120_000, now), "2m ago");
    assert_eq!(format_relative_time(now - 2 * 60 * 60_000, now), "2h ago");
    assert_eq!(format_relative_time(now - 3 * 24 * 60 * 60_000, now), "3d ago");
}

#[test]
fn title_preview_truncates_with_ellipsis() {
    let recipe = Recipe::new(RecipeDraft::titled(
        "Slow roasted tomato and garlic soup with basil",
    ));
    assert_eq!(title_preview(&recipe, 20), "Slow roasted toma...");

    let untitled = Recipe::new(RecipeDraft::default());
    assert_eq!(title_preview(&untitled, 20), "Untitled Recipe");
}

#[test]
fn list_item_and_line_carry_key_fields() {
    let mut recipe = Recipe::new(RecipeDraft {
        category: Some("Soup".to_string()),
        tags: Some("warm, easy".to_string()),
        cooking_time: 25,
        prep_time: 5,
        ..RecipeDraft::titled("Minestrone")
    });
    recipe.set_favorite(true);

    let item = recipe_to_list_item(&recipe);
    assert_eq!(item.title, "Minestrone");
    assert_eq!(item.total_time, 30);
    assert_eq!(item.tags, vec!["warm", "easy"]);
    assert!(item.is_favorite);
    assert_eq!(item.relative_time, "just now");

    let lines = format_recipe_lines(&[recipe]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("★"));
    assert!(lines[0].contains("Minestrone"));
    assert!(lines[0].contains("Soup"));
    assert!(lines[0].contains("30m"));
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn cli_parses_repeated_ingredients_and_steps() {
    let cli = Cli::try_parse_from([
        "recipes",
        "add",
        "--title",
        "Pancakes",
        "--ingredient",
        "flour",
        "--ingredient",
        "milk",
        "--step",
        "Mix",
        "--difficulty",
        "Medium",
        "--cooking-time",
        "15",
    ])
    .unwrap();

    let Commands::Add(fields) = cli.command else {
        panic!("expected add command");
    };
    assert_eq!(fields.ingredients, vec!["flour", "milk"]);
    assert_eq!(fields.steps, vec!["Mix"]);
    assert_eq!(fields.difficulty.as_deref(), Some("Medium"));
    assert_eq!(fields.cooking_time, Some(15));
}

#[test]
fn cli_rejects_unknown_difficulty() {
    let result = Cli::try_parse_from(["recipes", "add", "--difficulty", "Extreme"]);
    assert!(result.is_err());
}

#[test]
fn cli_parses_sort_key_or_label() {
    let cli = Cli::try_parse_from(["recipes", "list", "--sort", "cooking_time"]).unwrap();
    let Commands::List(args) = cli.command else {
        panic!("expected list command");
    };
    assert_eq!(args.sort, Some(SortOption::CookingTime));

    let cli = Cli::try_parse_from(["recipes", "list", "--sort", "Date Created"]).unwrap();
    let Commands::List(args) = cli.command else {
        panic!("expected list command");
    };
    assert_eq!(args.sort, Some(SortOption::DateCreated));

    assert!(Cli::try_parse_from(["recipes", "list", "--sort", "calories"]).is_err());
}

#[test]
fn cli_accepts_global_db_path_with_config_set() {
    let cli = Cli::try_parse_from([
        "recipes",
        "config",
        "set",
        "--database",
        "/tmp/other.db",
        "--default-sort",
        "title",
        "--db-path",
        "/tmp/flag.db",
    ])
    .unwrap();

    assert_eq!(cli.db_path, Some(PathBuf::from("/tmp/flag.db")));
    let Commands::Config {
        command:
            crate::cli::ConfigCommands::Set {
                database,
                default_sort,
                default_limit,
            },
    } = cli.command
    else {
        panic!("expected config set command");
    };
    assert_eq!(database.as_deref(), Some("/tmp/other.db"));
    assert_eq!(default_sort, Some(SortOption::Title));
    assert_eq!(default_limit, None);
}

#[test]
fn resolve_db_path_prefers_flag_then_config() {
    let config = CliConfig {
        db_path: Some("/srv/recipes/config.db".to_string()),
        ..CliConfig::default()
    };

    let explicit = PathBuf::from("/tmp/flag.db");
    assert_eq!(resolve_db_path(Some(explicit.clone()), &config), explicit);

    if std::env::var_os("RECIPES_DB_PATH").is_none() {
        assert_eq!(
            resolve_db_path(None, &config),
            PathBuf::from("/srv/recipes/config.db")
        );
        assert!(resolve_db_path(None, &CliConfig::default()).ends_with("recipes.db"));
    }
}

#[test]
fn run_add_stores_complete_recipe() {
    let (_dir, db_path) = test_db();

    run_add(&complete_fields("Sponge Cake"), &db_path).unwrap();

    let recipes = RecipeService::open_path(&db_path)
        .unwrap()
        .fetch_all()
        .unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].title.as_deref(), Some("Sponge Cake"));
    assert_eq!(
        recipes[0].ingredients.as_deref(),
        Some("2 eggs\n1 cup flour")
    );
    assert_eq!(recipes[0].instructions.as_deref(), Some("Whisk\nBake"));
    assert_eq!(recipes[0].total_time, 30);
    assert_eq!(recipes[0].servings, 1);
}

#[test]
fn run_add_rejects_incomplete_recipe() {
    let (_dir, db_path) = test_db();
    let fields = RecipeFieldArgs {
        category: None,
        ..complete_fields("Cake")
    };

    let error = run_add(&fields, &db_path).unwrap_err();
    assert!(matches!(error, CliError::IncompleteRecipe(ref missing) if missing == "category"));
    assert!(!db_path.exists());
}

#[test]
fn run_edit_updates_fields_and_total_time() {
    let (_dir, db_path) = test_db();
    let recipe = seed(&db_path, "Soup", "Main", 20);

    let fields = RecipeFieldArgs {
        prep_time: Some(15),
        notes: Some("Add salt last".to_string()),
        ..RecipeFieldArgs::default()
    };
    run_edit(&recipe.id.to_string(), &fields, &db_path).unwrap();

    let stored = RecipeService::open_path(&db_path)
        .unwrap()
        .get(&recipe.id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.title.as_deref(), Some("Soup"));
    assert_eq!(stored.notes.as_deref(), Some("Add salt last"));
    assert_eq!(stored.total_time, 35);
    assert_eq!(
        stored.date_created.map(|date| date.timestamp_millis()),
        recipe.date_created.map(|date| date.timestamp_millis())
    );
}

#[test]
fn resolve_recipe_accepts_unique_prefix() {
    let (_dir, db_path) = test_db();
    let recipe = seed(&db_path, "Soup", "Main", 20);
    let service = RecipeService::open_path(&db_path).unwrap();

    let id = recipe.id.to_string();
    let resolved = resolve_recipe(&id[..30], &service).unwrap();
    assert_eq!(resolved.id, recipe.id);

    let missing = resolve_recipe("not-a-recipe", &service).unwrap_err();
    assert!(matches!(missing, CliError::RecipeNotFound(_)));
}

#[test]
fn resolve_recipe_reports_ambiguous_prefix() {
    let (_dir, db_path) = test_db();
    let first = seed(&db_path, "Soup", "Main", 20).id.to_string();
    let second = seed(&db_path, "Stew", "Main", 90).id.to_string();
    let service = RecipeService::open_path(&db_path).unwrap();

    let shared_len = first
        .chars()
        .zip(second.chars())
        .take_while(|(left, right)| left == right)
        .count();
    assert!(shared_len > 0);

    let error = resolve_recipe(&first[..shared_len], &service).unwrap_err();
    let CliError::AmbiguousRecipeId(message) = error else {
        panic!("expected ambiguous id error");
    };
    assert!(message.contains("is ambiguous"));
}

#[test]
fn select_recipes_applies_filters_sort_and_limit() {
    let (_dir, db_path) = test_db();
    seed(&db_path, "Stew", "Main", 90);
    seed(&db_path, "Salad", "Side", 5);
    seed(&db_path, "Curry", "Main", 40);
    seed(&db_path, "Chili", "Main", 60);
    let service = RecipeService::open_path(&db_path).unwrap();

    let args = ListArgs {
        category: Some("Main".to_string()),
        sort: Some(SortOption::CookingTime),
        limit: Some(2),
        ..ListArgs::default()
    };
    let recipes = select_recipes(&args, &CliConfig::default(), &service).unwrap();
    assert_eq!(titles(&recipes), vec!["Curry", "Chili"]);

    let args = ListArgs {
        search: Some("  SAL ".to_string()),
        ..ListArgs::default()
    };
    let recipes = select_recipes(&args, &CliConfig::default(), &service).unwrap();
    assert_eq!(titles(&recipes), vec!["Salad"]);
}

#[test]
fn select_recipes_falls_back_to_config_defaults() {
    let (_dir, db_path) = test_db();
    seed(&db_path, "Banana Bread", "Bakery", 60);
    seed(&db_path, "Apple Pie", "Bakery", 50);
    seed(&db_path, "Cornbread", "Bakery", 30);
    let service = RecipeService::open_path(&db_path).unwrap();

    let config = CliConfig {
        default_sort: Some(SortOption::Title),
        default_limit: Some(2),
        ..CliConfig::default()
    };
    let recipes = select_recipes(&ListArgs::default(), &config, &service).unwrap();
    assert_eq!(titles(&recipes), vec!["Apple Pie", "Banana Bread"]);

    let args = ListArgs {
        sort: Some(SortOption::CookingTime),
        limit: Some(5),
        ..ListArgs::default()
    };
    let recipes = select_recipes(&args, &config, &service).unwrap();
    assert_eq!(titles(&recipes), vec!["Cornbread", "Apple Pie", "Banana Bread"]);
}

#[test]
fn query_from_args_defaults_to_all() {
    let params = query_from_args(&ListArgs::default(), &CliConfig::default());
    assert_eq!(params, recipe_core::query::RecipeQuery::default());
}

#[test]
fn run_favorite_toggles_and_list_filters_favorites() {
    let (_dir, db_path) = test_db();
    let soup = seed(&db_path, "Soup", "Main", 20);
    seed(&db_path, "Stew", "Main", 90);

    run_favorite(&soup.id.to_string(), &db_path).unwrap();

    let service = RecipeService::open_path(&db_path).unwrap();
    let args = ListArgs {
        favorites: true,
        ..ListArgs::default()
    };
    let favorites = select_recipes(&args, &CliConfig::default(), &service).unwrap();
    assert_eq!(titles(&favorites), vec!["Soup"]);

    run_favorite(&soup.id.to_string(), &db_path).unwrap();
    let favorites = select_recipes(&args, &CliConfig::default(), &service).unwrap();
    assert!(favorites.is_empty());
}

#[test]
fn show_text_includes_times_and_created_date() {
    let (_dir, db_path) = test_db();
    run_add(&complete_fields("Pancakes"), &db_path).unwrap();
    let service = RecipeService::open_path(&db_path).unwrap();
    let recipe = service.fetch_all().unwrap().remove(0);
    drop(service);

    let text = show_text(&recipe.id.as_str()[..8], &db_path).unwrap();
    assert!(text.starts_with("🍽️ Pancakes\n\n"));
    assert!(text.contains("🔪 Prep Time: 10 minutes\n"));
    assert!(text.contains("⌛ Total Time: 30 minutes\n"));
    assert!(text.contains("\nCreated: "));
    assert!(!text.contains("Modified: "));
}

#[test]
fn show_text_lists_modified_date_after_edit() {
    let (_dir, db_path) = test_db();
    let recipe = seed(&db_path, "Soup", "Dinner", 30);
    std::thread::sleep(std::time::Duration::from_millis(5));
    let service = RecipeService::open_path(&db_path).unwrap();
    service
        .update(
            &recipe.id,
            RecipeDraft {
                servings: 6,
                ..RecipeDraft::from(&recipe)
            },
        )
        .unwrap();
    drop(service);

    let text = show_text(&recipe.id.as_str(), &db_path).unwrap();
    assert!(text.contains("👥 Servings: 6\n"));
    assert!(text.contains("\nModified: "));
}

#[test]
fn run_delete_removes_recipe() {
    let (_dir, db_path) = test_db();
    let recipe = seed(&db_path, "Soup", "Main", 20);

    run_delete(&recipe.id.to_string(), &db_path).unwrap();

    let service = RecipeService::open_path(&db_path).unwrap();
    assert!(service.fetch_all().unwrap().is_empty());
    assert!(matches!(
        run_delete(&recipe.id.to_string(), &db_path),
        Err(CliError::RecipeNotFound(_))
    ));
}

#[test]
fn run_categories_delete_moves_recipes() {
    let (_dir, db_path) = test_db();
    seed(&db_path, "Cake", "Dessert", 30);
    seed(&db_path, "Soup", "Main", 20);

    run_categories(
        Some(crate::cli::CategoryCommands::Delete {
            name: "Dessert".to_string(),
        }),
        false,
        &db_path,
    )
    .unwrap();

    let service = RecipeService::open_path(&db_path).unwrap();
    assert_eq!(service.categories().unwrap(), vec!["Main", UNCATEGORIZED]);
}

#[test]
fn run_export_writes_structured_record_file() {
    let (dir, db_path) = test_db();
    let recipe = seed(&db_path, "Soup", "Main", 20);
    let output_path = dir.path().join("soup.json");

    run_export(
        &recipe.id.to_string(),
        ExportFormat::Json,
        Some(&output_path),
        &db_path,
    )
    .unwrap();

    let exported = std::fs::read_to_string(&output_path).unwrap();
    assert!(exported.contains("\"title\": \"Soup\""));
    assert!(exported.contains("\"cookingTime\": 20"));
    assert!(exported.contains("\"difficulty\": \"\""));
}

#[test]
fn run_export_writes_html_and_message() {
    let (dir, db_path) = test_db();
    let recipe = seed(&db_path, "Fish & Chips", "Main", 20);

    let html_path = dir.path().join("fish.html");
    run_export(
        &recipe.id.to_string(),
        ExportFormat::Html,
        Some(&html_path),
        &db_path,
    )
    .unwrap();
    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("Fish &amp; Chips"));

    let message_path = dir.path().join("fish.txt");
    run_export(
        &recipe.id.to_string(),
        ExportFormat::Message,
        Some(&message_path),
        &db_path,
    )
    .unwrap();
    let message = std::fs::read_to_string(&message_path).unwrap();
    assert!(message.contains("Fish & Chips"));
    assert!(message.contains("Shared from Recipe Circle"));
}

#[test]
fn run_export_into_directory_uses_suggested_file_name() {
    let (dir, db_path) = test_db();
    let recipe = seed(&db_path, "Beef Stew", "Main", 90);

    run_export(
        &recipe.id.to_string(),
        ExportFormat::Html,
        Some(dir.path()),
        &db_path,
    )
    .unwrap();

    assert!(dir.path().join("beef-stew.html").exists());
}

#[test]
fn run_import_reads_exported_file() {
    let (dir, db_path) = test_db();
    let payload_path = dir.path().join("import.json");
    std::fs::write(
        &payload_path,
        r#"{"title": "Gazpacho", "category": "Soup", "cookingTime": 0, "prepTime": 15}"#,
    )
    .unwrap();

    run_import(Some(&payload_path), ImportFormatArg::Json, &db_path).unwrap();

    let recipes = RecipeService::open_path(&db_path)
        .unwrap()
        .fetch_all()
        .unwrap();
    assert_eq!(titles(&recipes), vec!["Gazpacho"]);
    assert_eq!(recipes[0].total_time, 15);
    assert_eq!(recipes[0].servings, 1);
}

#[test]
fn run_import_rejects_malformed_payload() {
    let (dir, db_path) = test_db();
    let payload_path = dir.path().join("broken.json");
    std::fs::write(&payload_path, "[1, 2]").unwrap();

    let error = run_import(Some(&payload_path), ImportFormatArg::Json, &db_path).unwrap_err();
    assert!(matches!(
        error,
        CliError::Core(recipe_core::Error::Import(_))
    ));
}

#[test]
fn apply_config_changes_keeps_unset_values() {
    let mut config = CliConfig {
        default_limit: Some(10),
        ..CliConfig::default()
    };

    apply_config_changes(&mut config, None, Some(SortOption::Difficulty), None);

    assert_eq!(config.default_sort, Some(SortOption::Difficulty));
    assert_eq!(config.default_limit, Some(10));
    assert_eq!(config.db_path, None);
}

#[test]
fn completion_scripts_name_the_binary() {
    let script = String::from_utf8(completion_script(CompletionShell::Bash)).unwrap();
    assert!(script.contains("_recipes()"));
    assert!(script.contains("complete -F _recipes"));

    let fish = String::from_utf8(completion_script(CompletionShell::Fish)).unwrap();
    assert!(fish.contains("complete -c recipes"));
}

#[test]
fn run_completions_writes_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("recipes.bash");

    run_completions(CompletionShell::Bash, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("_recipes()"));
}
