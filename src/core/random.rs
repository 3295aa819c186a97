//! Random prompt assembly from wizard categories.
//!
//! Every field in every category gets exactly one value from a caller-supplied
//! picker. Values are grouped by the prefix of the field key, so categories
//! that share a prefix merge into one group.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::cleaner::clean;
use crate::core::diversity::PickError;
use crate::schema::category::WizardCategory;

/// Field values keyed by group, then by sub-key, in iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RandomPrompt {
    pub groups: IndexMap<String, IndexMap<String, String>>,
}

impl RandomPrompt {
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups.get(group)?.get(key).map(String::as_str)
    }

    /// The record as JSON, every group included. A category without fields
    /// shows up as an empty object under its id.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        encode(&self.to_value()?, pretty)
    }

    /// JSON value with empty groups pruned. An entirely empty prompt becomes
    /// an empty object.
    pub fn to_cleaned_value(&self) -> Result<Value, serde_json::Error> {
        let raw = self.to_value()?;
        Ok(clean(&raw).unwrap_or_else(|| Value::Object(Default::default())))
    }

    pub fn to_cleaned_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        encode(&self.to_cleaned_value()?, pretty)
    }
}

fn encode(value: &Value, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Split a field key into (group, sub-key) at the first dot. Keys without a
/// dot fall under `fallback_group`.
fn split_field_key<'a>(key: &'a str, fallback_group: &'a str) -> (&'a str, &'a str) {
    key.split_once('.').unwrap_or((fallback_group, key))
}

/// Build a random prompt by calling `picker(field_key, suggestions)` once per
/// field, in category and field order.
///
/// A category without fields still gets an empty group under its own id.
pub fn build_random_prompt<F>(
    categories: &[WizardCategory],
    mut picker: F,
) -> Result<RandomPrompt, PickError>
where
    F: FnMut(&str, &[String]) -> Result<String, PickError>,
{
    let mut prompt = RandomPrompt::default();

    for category in categories {
        if category.fields.is_empty() {
            prompt.groups.entry(category.id.clone()).or_default();
            continue;
        }

        for field in &category.fields {
            let (group, sub_key) = split_field_key(&field.key, &category.id);
            let value = picker(&field.key, &field.suggestions)?;
            prompt
                .groups
                .entry(group.to_string())
                .or_default()
                .insert(sub_key.to_string(), value);
        }
    }

    tracing::debug!(
        categories = categories.len(),
        groups = prompt.groups.len(),
        "built random prompt"
    );
    Ok(prompt)
}

/// Join every non-blank value, trimmed, with `", "` in group and key order.
pub fn flatten_prompt_to_text(prompt: &RandomPrompt) -> String {
    prompt
        .groups
        .values()
        .flat_map(|fields| fields.values())
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
