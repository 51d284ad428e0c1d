//! Recipe sharing and export formats.
//!
//! Text and HTML renderings share one section order. A section whose field
//! is absent (missing or empty text, zero minutes or servings) is left out
//! entirely rather than rendered blank.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Recipe;
use crate::util::slugify;

/// Closing line of every shared recipe.
pub const SHARE_FOOTER: &str = "📱 Shared from Recipe Circle";

/// Output format for [`format`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportTarget {
    PlainText,
    Html,
    StructuredRecord,
}

impl ExportTarget {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Html => "html",
            Self::StructuredRecord => "json",
        }
    }
}

/// Field set written by the structured export and read back by the import.
///
/// Absent text becomes `""`, absent numbers `0`, dates are epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRecipe {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: String,
    pub difficulty: String,
    pub cooking_time: u32,
    pub prep_time: u32,
    pub servings: u32,
    pub notes: String,
    pub tags: String,
    pub date_created: f64,
    pub date_modified: f64,
}

impl From<&Recipe> for StructuredRecipe {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: text_or_empty(recipe.title.as_ref()),
            ingredients: text_or_empty(recipe.ingredients.as_ref()),
            instructions: text_or_empty(recipe.instructions.as_ref()),
            category: text_or_empty(recipe.category.as_ref()),
            difficulty: text_or_empty(recipe.difficulty.as_ref()),
            cooking_time: recipe.cooking_time,
            prep_time: recipe.prep_time,
            servings: recipe.servings,
            notes: text_or_empty(recipe.notes.as_ref()),
            tags: text_or_empty(recipe.tags.as_ref()),
            date_created: epoch_seconds(recipe.date_created),
            date_modified: epoch_seconds(recipe.date_modified),
        }
    }
}

/// Render a recipe in the requested target format.
pub fn format(recipe: &Recipe, target: ExportTarget) -> serde_json::Result<String> {
    match target {
        ExportTarget::PlainText => Ok(render_plain_text(recipe)),
        ExportTarget::Html => Ok(render_html(recipe)),
        ExportTarget::StructuredRecord => render_structured_record(recipe),
    }
}

/// Plain-text share sheet rendering.
#[must_use]
pub fn render_plain_text(recipe: &Recipe) -> String {
    let mut text = String::new();

    let _ = write!(text, "🍽️ {}\n\n", recipe.display_title());

    if let Some(category) = present(recipe.category.as_ref()) {
        let _ = writeln!(text, "📂 Category: {category}");
    }
    if let Some(difficulty) = present(recipe.difficulty.as_ref()) {
        let _ = writeln!(text, "⭐ Difficulty: {difficulty}");
    }
    if recipe.cooking_time > 0 {
        let _ = writeln!(text, "⏱️ Cooking Time: {} minutes", recipe.cooking_time);
    }
    if recipe.servings > 0 {
        let _ = writeln!(text, "👥 Servings: {}", recipe.servings);
    }
    text.push('\n');

    if let Some(ingredients) = present(recipe.ingredients.as_ref()) {
        let _ = write!(text, "🥘 INGREDIENTS:\n{ingredients}\n\n");
    }
    if let Some(instructions) = present(recipe.instructions.as_ref()) {
        let _ = write!(text, "👨‍🍳 INSTRUCTIONS:\n{instructions}\n\n");
    }
    if let Some(notes) = present(recipe.notes.as_ref()) {
        let _ = write!(text, "📝 NOTES:\n{notes}\n\n");
    }
    if let Some(tags) = present(recipe.tags.as_ref()) {
        let _ = write!(text, "🏷️ TAGS: {tags}\n\n");
    }

    text.push_str(SHARE_FOOTER);
    text
}

/// Full plain-text view of one recipe, for reading rather than sharing.
///
/// Adds prep and total time to the share rendering's meta lines and closes
/// with the record's dates. The modified date only appears when it differs
/// from the created date.
#[must_use]
pub fn render_detail_text(recipe: &Recipe) -> String {
    let mut text = String::new();

    let _ = write!(text, "🍽️ {}\n\n", recipe.display_title());

    if let Some(category) = present(recipe.category.as_ref()) {
        let _ = writeln!(text, "📂 Category: {category}");
    }
    if let Some(difficulty) = present(recipe.difficulty.as_ref()) {
        let _ = writeln!(text, "⭐ Difficulty: {difficulty}");
    }
    if recipe.cooking_time > 0 {
        let _ = writeln!(text, "⏱️ Cooking Time: {} minutes", recipe.cooking_time);
    }
    if recipe.prep_time > 0 {
        let _ = writeln!(text, "🔪 Prep Time: {} minutes", recipe.prep_time);
    }
    if recipe.total_time > 0 {
        let _ = writeln!(text, "⌛ Total Time: {} minutes", recipe.total_time);
    }
    if recipe.servings > 0 {
        let _ = writeln!(text, "👥 Servings: {}", recipe.servings);
    }
    text.push('\n');

    if let Some(ingredients) = present(recipe.ingredients.as_ref()) {
        let _ = write!(text, "🥘 INGREDIENTS:\n{ingredients}\n\n");
    }
    if let Some(instructions) = present(recipe.instructions.as_ref()) {
        let _ = write!(text, "👨‍🍳 INSTRUCTIONS:\n{instructions}\n\n");
    }
    if let Some(notes) = present(recipe.notes.as_ref()) {
        let _ = write!(text, "📝 NOTES:\n{notes}\n\n");
    }
    if let Some(tags) = present(recipe.tags.as_ref()) {
        let _ = write!(text, "🏷️ TAGS: {tags}\n\n");
    }

    if let Some(created) = recipe.date_created {
        let _ = writeln!(text, "Created: {}", detail_date(created));
    }
    let changed = recipe
        .date_modified
        .filter(|modified| Some(*modified) != recipe.date_created);
    if let Some(modified) = changed {
        let _ = writeln!(text, "Modified: {}", detail_date(modified));
    }
    text
}

fn detail_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y at %-I:%M %p").to_string()
}

const HTML_HEAD: &str = r#"<html>
<head>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif; padding: 20px; background-color: #f5f5f5; }
        .container { background-color: white; border-radius: 10px; padding: 30px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); max-width: 600px; margin: 0 auto; }
        h1 { color: #FF6B35; margin-bottom: 10px; }
        .meta { background-color: #FFF3E0; padding: 15px; border-radius: 8px; margin: 20px 0; }
        .meta-item { display: inline-block; margin-right: 15px; color: #666; }
        .section { margin: 25px 0; }
        .section-title { color: #FF6B35; font-weight: bold; font-size: 18px; margin-bottom: 10px; border-bottom: 2px solid #FF6B35; padding-bottom: 5px; }
        .content { line-height: 1.6; white-space: pre-wrap; color: #333; }
        .footer { text-align: center; color: #999; margin-top: 40px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; }
    </style>
</head>
<body>
    <div class="container">
"#;

/// E-mail body rendering.
///
/// User text is HTML-escaped; newlines in ingredients, instructions and
/// notes become `<br>`.
#[must_use]
pub fn render_html(recipe: &Recipe) -> String {
    let mut html = String::from(HTML_HEAD);

    let _ = writeln!(
        html,
        "        <h1>🍽️ {}</h1>",
        escape(recipe.display_title())
    );

    html.push_str("        <div class=\"meta\">");
    if let Some(category) = present(recipe.category.as_ref()) {
        push_meta_item(&mut html, &format!("📂 {}", escape(category)));
    }
    if let Some(difficulty) = present(recipe.difficulty.as_ref()) {
        push_meta_item(&mut html, &format!("⭐ {}", escape(difficulty)));
    }
    if recipe.cooking_time > 0 {
        push_meta_item(&mut html, &format!("⏱️ {} min", recipe.cooking_time));
    }
    if recipe.prep_time > 0 {
        push_meta_item(&mut html, &format!("🔪 Prep: {} min", recipe.prep_time));
    }
    if recipe.servings > 0 {
        push_meta_item(&mut html, &format!("👥 {} servings", recipe.servings));
    }
    html.push_str("</div>\n");

    if let Some(ingredients) = present(recipe.ingredients.as_ref()) {
        push_section(&mut html, "🥘 Ingredients", &multiline(ingredients));
    }
    if let Some(instructions) = present(recipe.instructions.as_ref()) {
        push_section(&mut html, "👨‍🍳 Instructions", &multiline(instructions));
    }
    if let Some(notes) = present(recipe.notes.as_ref()) {
        push_section(&mut html, "📝 Notes", &multiline(notes));
    }
    if let Some(tags) = present(recipe.tags.as_ref()) {
        push_section(&mut html, "🏷️ Tags", &escape(tags));
    }

    let _ = write!(
        html,
        "        <div class=\"footer\">\n            {SHARE_FOOTER}\n        </div>\n    </div>\n</body>\n</html>\n"
    );
    html
}

/// Pretty-printed structured record.
pub fn render_structured_record(recipe: &Recipe) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&StructuredRecipe::from(recipe))
}

/// Short text message rendering: one meta line, ingredients, instructions.
///
/// Every meta item after the category carries a leading ` • `, so a recipe
/// without a category starts its meta line with the separator.
#[must_use]
pub fn render_message_text(recipe: &Recipe) -> String {
    let mut text = format!("🍽️ {}\n\n", recipe.title.as_deref().unwrap_or("Recipe"));

    if let Some(category) = present(recipe.category.as_ref()) {
        let _ = write!(text, "📂 {category}");
    }
    if let Some(difficulty) = present(recipe.difficulty.as_ref()) {
        let _ = write!(text, " • {difficulty}");
    }
    if recipe.cooking_time > 0 {
        let _ = write!(text, " • ⏱️ {}min", recipe.cooking_time);
    }
    if recipe.servings > 0 {
        let _ = write!(text, " • 👥 {} servings", recipe.servings);
    }
    text.push_str("\n\n");

    if let Some(ingredients) = present(recipe.ingredients.as_ref()) {
        let _ = write!(text, "🥘 INGREDIENTS:\n{ingredients}\n\n");
    }
    if let Some(instructions) = present(recipe.instructions.as_ref()) {
        let _ = write!(text, "👨‍🍳 INSTRUCTIONS:\n{instructions}\n\n");
    }

    text.push_str(SHARE_FOOTER);
    text
}

/// Subject line for e-mail sharing.
#[must_use]
pub fn email_subject(recipe: &Recipe) -> String {
    format!("Recipe: {}", recipe.title.as_deref().unwrap_or("Untitled"))
}

/// Build a file name from the recipe title and target extension.
#[must_use]
pub fn suggested_export_file_name(recipe: &Recipe, target: ExportTarget) -> String {
    let slug = slugify(recipe.display_title());
    let stem = if slug.is_empty() { "recipe" } else { &slug };
    format!("{stem}.{}", target.extension())
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|text| !text.is_empty())
}

fn text_or_empty(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

#[allow(clippy::cast_precision_loss)] // millisecond timestamps fit well inside f64's mantissa
fn epoch_seconds(value: Option<DateTime<Utc>>) -> f64 {
    value.map_or(0.0, |date| date.timestamp_millis() as f64 / 1000.0)
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

fn multiline(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}

fn push_meta_item(html: &mut String, item: &str) {
    let _ = write!(html, "<span class=\"meta-item\">{item}</span>");
}

fn push_section(html: &mut String, title: &str, content: &str) {
    let _ = write!(
        html,
        "        <div class=\"section\">\n            <div class=\"section-title\">{title}</div>\n            <div class=\"content\">{content}</div>\n        </div>\n"
    );
}
