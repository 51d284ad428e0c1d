use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use recipe_core::export::ExportTarget;
use recipe_core::import::ImportFormat;
use recipe_core::query::{fixed_difficulties, SortOption};

#[derive(Parser)]
#[command(name = "recipes")]
#[command(about = "Create, browse, search and share your recipes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new recipe
    #[command(alias = "new")]
    Add(RecipeFieldArgs),
    /// Change fields of an existing recipe
    Edit {
        /// Recipe ID or unique ID prefix
        id: String,
        #[command(flatten)]
        fields: RecipeFieldArgs,
    },
    /// List recipes, filtered and sorted
    #[command(alias = "ls")]
    List(ListArgs),
    /// Print a recipe
    Show {
        /// Recipe ID or unique ID prefix
        id: String,
    },
    /// Delete a recipe permanently
    #[command(alias = "rm")]
    Delete {
        /// Recipe ID or unique ID prefix
        id: String,
    },
    /// Toggle the favorite flag of a recipe
    Favorite {
        /// Recipe ID or unique ID prefix
        id: String,
    },
    /// List categories in use, or delete one
    Categories {
        #[command(subcommand)]
        command: Option<CategoryCommands>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the difficulty levels
    Difficulties,
    /// Export or share a single recipe
    Export {
        /// Recipe ID or unique ID prefix
        id: String,
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import a recipe from a file or stdin
    Import {
        /// File to read (stdin when omitted)
        path: Option<PathBuf>,
        /// Payload format
        #[arg(long, value_enum, default_value_t = ImportFormatArg::Json)]
        format: ImportFormatArg,
    },
    /// Show or change persisted CLI defaults
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Editable recipe fields. Omitted flags leave the field untouched on edit.
#[derive(Args, Debug, Clone, Default)]
pub struct RecipeFieldArgs {
    /// Recipe title
    #[arg(long)]
    pub title: Option<String>,
    /// One ingredient line (repeatable)
    #[arg(long = "ingredient", value_name = "TEXT")]
    pub ingredients: Vec<String>,
    /// One instruction step (repeatable)
    #[arg(long = "step", value_name = "TEXT")]
    pub steps: Vec<String>,
    /// Category name
    #[arg(long)]
    pub category: Option<String>,
    /// Difficulty level
    #[arg(long, value_parser = PossibleValuesParser::new(fixed_difficulties()))]
    pub difficulty: Option<String>,
    /// Cooking time in minutes
    #[arg(long, value_name = "MINUTES")]
    pub cooking_time: Option<u32>,
    /// Preparation time in minutes
    #[arg(long, value_name = "MINUTES")]
    pub prep_time: Option<u32>,
    /// Number of servings
    #[arg(long)]
    pub servings: Option<u32>,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Match title, ingredients or instructions (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
    /// Exact category to keep
    #[arg(long)]
    pub category: Option<String>,
    /// Exact difficulty to keep
    #[arg(long)]
    pub difficulty: Option<String>,
    /// Sort order: date_created, title, cooking_time or difficulty
    #[arg(long)]
    pub sort: Option<SortOption>,
    /// Number of recipes to show
    #[arg(short, long)]
    pub limit: Option<usize>,
    /// Only favorite recipes
    #[arg(long)]
    pub favorites: bool,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Text,
    Html,
    Json,
    /// Compact text for messaging apps
    Message,
}

impl ExportFormat {
    /// Core export target, `None` for the message rendering
    pub const fn target(self) -> Option<ExportTarget> {
        match self {
            Self::Text => Some(ExportTarget::PlainText),
            Self::Html => Some(ExportTarget::Html),
            Self::Json => Some(ExportTarget::StructuredRecord),
            Self::Message => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ImportFormatArg {
    Json,
    Text,
}

impl From<ImportFormatArg> for ImportFormat {
    fn from(format: ImportFormatArg) -> Self {
        match format {
            ImportFormatArg::Json => Self::StructuredRecord,
            ImportFormatArg::Text => Self::PlainText,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Delete a category, moving its recipes to "Uncategorized"
    Delete {
        /// Category name (exact)
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current config
    Show,
    /// Update one or more defaults
    Set {
        /// Database file used when --db-path and RECIPES_DB_PATH are unset (empty clears)
        #[arg(long, value_name = "PATH")]
        database: Option<String>,
        /// Default sort order for `list`
        #[arg(long, value_name = "SORT")]
        default_sort: Option<SortOption>,
        /// Default number of recipes for `list` (0 clears)
        #[arg(long, value_name = "N")]
        default_limit: Option<usize>,
    },
}
