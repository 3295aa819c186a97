//! Output renderers: pruned JSON and a single natural-language paragraph.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::cleaner::clean;
use crate::core::sections::collect_fragments;
use crate::schema::prompt::ImagePrompt;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The cleaned JSON document for a prompt. Always contains at least
/// `prompt_type`.
pub fn cleaned_value(prompt: &ImagePrompt) -> Result<Value, RenderError> {
    let raw = prompt.to_value()?;
    Ok(clean(&raw).unwrap_or_else(|| {
        let mut tag_only = Map::new();
        tag_only.insert(
            "prompt_type".to_string(),
            Value::String(prompt.prompt_type.as_str().to_string()),
        );
        Value::Object(tag_only)
    }))
}

/// Pretty-printed (2-space indent) JSON with unspecified fields removed.
pub fn generate_json(prompt: &ImagePrompt) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(&cleaned_value(prompt)?)?)
}

/// Same document as [`generate_json`] without whitespace.
pub fn generate_compact_json(prompt: &ImagePrompt) -> Result<String, RenderError> {
    Ok(serde_json::to_string(&cleaned_value(prompt)?)?)
}

/// Render the prompt as one flowing paragraph.
///
/// Fragments are joined with `". "`, doubled periods are collapsed, the
/// first character is capitalized, and the result always ends with a period.
/// The collapse is a plain `".."` → `"."` replace, so an ellipsis inside a
/// field value loses a dot.
pub fn generate_natural_language(prompt: &ImagePrompt) -> String {
    join_fragments(&collect_fragments(prompt))
}

/// Join fragments into prose. An empty fragment list yields `"."`.
pub fn join_fragments(fragments: &[String]) -> String {
    let joined = fragments.join(". ").replace("..", ".");
    let mut text = capitalize_first(&joined);
    if !text.ends_with('.') {
        text.push('.');
    }
    text
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
