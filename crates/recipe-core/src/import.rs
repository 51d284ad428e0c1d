//! Best-effort recipe import.
//!
//! Imported recipes are always new records: fresh id, fresh timestamps,
//! ignoring any dates the payload carries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Recipe, RecipeDraft, DEFAULT_SERVINGS};

/// Title used when a plain-text payload is empty.
pub const IMPORTED_RECIPE_TITLE: &str = "Imported Recipe";

/// Payload format accepted by [`parse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportFormat {
    /// JSON object with the structured export's field names
    StructuredRecord,
    /// Free text; only the first line is used
    PlainText,
}

/// Why a payload could not become a recipe
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Not decodable as a field mapping
    #[error("malformed recipe record: {0}")]
    MalformedRecord(String),

    /// Text payload is not valid UTF-8
    #[error("payload is not valid UTF-8 text")]
    InvalidEncoding,
}

/// Build a recipe from an external payload.
pub fn parse(payload: &[u8], format: ImportFormat) -> Result<Recipe, ParseFailure> {
    let result = match format {
        ImportFormat::StructuredRecord => parse_structured_record(payload),
        ImportFormat::PlainText => parse_plain_text(payload),
    };

    if let Err(error) = &result {
        tracing::warn!("Recipe import failed ({:?}): {}", format, error);
    }
    result
}

/// Read a JSON object using the structured export's field set.
///
/// Fields of the wrong JSON type are treated as absent.
pub fn parse_structured_record(payload: &[u8]) -> Result<Recipe, ParseFailure> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|error| ParseFailure::MalformedRecord(error.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ParseFailure::MalformedRecord(format!(
            "expected a JSON object, found {}",
            json_kind(&value)
        )));
    };

    let draft = RecipeDraft {
        title: text_field(&fields, "title"),
        ingredients: text_field(&fields, "ingredients"),
        instructions: text_field(&fields, "instructions"),
        category: text_field(&fields, "category"),
        difficulty: text_field(&fields, "difficulty"),
        cooking_time: count_field(&fields, "cookingTime").unwrap_or(0),
        prep_time: count_field(&fields, "prepTime").unwrap_or(0),
        servings: count_field(&fields, "servings").unwrap_or(DEFAULT_SERVINGS),
        notes: text_field(&fields, "notes"),
        tags: text_field(&fields, "tags"),
        image_data: None,
    };

    Ok(Recipe::new(draft))
}

/// Use the first line of the text as the title and nothing else.
pub fn parse_plain_text(payload: &[u8]) -> Result<Recipe, ParseFailure> {
    let text = std::str::from_utf8(payload).map_err(|_| ParseFailure::InvalidEncoding)?;

    let title = if text.is_empty() {
        IMPORTED_RECIPE_TITLE
    } else {
        let first_line = text.split('\n').next().unwrap_or_default();
        first_line.strip_suffix('\r').unwrap_or(first_line)
    };

    Ok(Recipe::new(RecipeDraft::titled(title)))
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(ToString::to_string)
}

/// A non-negative whole number; `20` and `20.0` both count.
fn count_field(fields: &Map<String, Value>, key: &str) -> Option<u32> {
    let value = fields.get(key)?;
    if let Some(count) = value.as_u64() {
        return u32::try_from(count).ok();
    }
    value.as_f64().and_then(whole_count)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn whole_count(number: f64) -> Option<u32> {
    (number.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&number))
        .then(|| number as u32)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
