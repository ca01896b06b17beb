//! Best-effort conversion of the generation collaborator's loosely
//! structured output into the canonical recipe shape.
//!
//! Depending on how its workflow is configured, the collaborator answers
//! with raw JSON, free text, or free text with an embedded fenced JSON
//! block. Decoding is attempted in order of specificity: fenced block
//! first, then the whole payload, then give up. Nothing here does I/O and
//! the result is deterministic for a given input.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::NormalizeError;
use crate::types::NormalizedRecipe;

/// Keys probed, in order, for the text of an instruction step object.
pub const INSTRUCTION_TEXT_KEYS: &[&str] = &["description", "step", "text"];

/// Keys probed, in order, for the cook time field.
pub const COOK_TIME_KEYS: &[&str] = &["cookTimeMinutes", "cookTime", "cookingTime"];

/// Applied when the payload carries no parsable cook time.
pub const DEFAULT_COOK_TIME_MINUTES: i32 = 30;

/// Regex to find a fenced code block, with or without a language tag.
static FENCED_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(.+?)\s*```").expect("Invalid fenced block regex")
});

/// Regex to pull the first integer out of a free-text duration ("40 minutes").
static FIRST_INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("Invalid integer regex"));

/// Normalize the collaborator's raw output into a [`NormalizedRecipe`].
///
/// `input_ingredients` is the caller's original ingredient list, used as a
/// fallback when the generated payload omits its own.
pub fn normalize_generated(
    raw: &str,
    input_ingredients: &[String],
) -> Result<NormalizedRecipe, NormalizeError> {
    let payload = decode_payload(raw)?;

    let title = payload
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| NormalizeError::MissingField("title".to_string()))?
        .to_string();

    let instructions = payload
        .get("instructions")
        .and_then(flatten_instructions)
        .ok_or_else(|| NormalizeError::MissingField("instructions".to_string()))?;

    let cook_time_minutes = extract_cook_time(&payload);

    let mut ingredients = payload
        .get("ingredients")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if ingredients.is_empty() {
        ingredients = input_ingredients
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if ingredients.is_empty() {
        return Err(NormalizeError::MissingField("ingredients".to_string()));
    }

    Ok(NormalizedRecipe {
        title,
        ingredients,
        instructions,
        cook_time_minutes,
    })
}

/// Locate and decode the structured part of the payload.
///
/// A fenced block takes precedence over the payload as a whole, so prose
/// around the block does not break decoding.
fn decode_payload(raw: &str) -> Result<Value, NormalizeError> {
    if let Some(cap) = FENCED_BLOCK_REGEX.captures(raw) {
        if let Ok(value) = serde_json::from_str::<Value>(cap[1].trim()) {
            if value.is_object() {
                return Ok(value);
            }
        }
    }

    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(value) if value.is_object() => Ok(value),
        _ => Err(NormalizeError::Unparsable),
    }
}

/// Flatten an instructions value to newline-joined text.
///
/// Accepts a plain string, or a sequence of steps where each step is a
/// string or an object carrying its text under one of
/// [`INSTRUCTION_TEXT_KEYS`]. Empty entries are dropped.
fn flatten_instructions(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(steps) => steps
            .iter()
            .filter_map(step_text)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn step_text(step: &Value) -> Option<String> {
    let text = match step {
        Value::String(s) => s.trim(),
        Value::Object(map) => INSTRUCTION_TEXT_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .unwrap_or(""),
        _ => "",
    };

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Probe [`COOK_TIME_KEYS`] for a cook time and coerce it to whole minutes.
///
/// Falls back to [`DEFAULT_COOK_TIME_MINUTES`] when nothing parses. The
/// miss is logged rather than surfaced; saving with a plausible default
/// beats losing the recipe over a malformed duration.
fn extract_cook_time(payload: &Value) -> i32 {
    for key in COOK_TIME_KEYS {
        if let Some(minutes) = payload.get(*key).and_then(coerce_minutes) {
            return minutes;
        }
    }

    tracing::debug!(
        "no parsable cook time in generated payload, defaulting to {} minutes",
        DEFAULT_COOK_TIME_MINUTES
    );
    DEFAULT_COOK_TIME_MINUTES
}

fn coerce_minutes(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => FIRST_INTEGER_REGEX
            .captures(s)
            .and_then(|cap| cap[1].parse().ok()),
        _ => None,
    }
}
