//! Field categories keyed by full prompt paths, and the packs and presets
//! that select them.
//!
//! Unlike the wizard catalog, every field key here is a dot path into
//! [`ImagePrompt`] (`"subject.hair.style"`), so answers can be written
//! straight into a prompt record.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

use crate::core::diversity::PickError;
use crate::schema::category::WizardField;
use crate::schema::prompt::ImagePrompt;

const BUILTIN_FIELDS: &str = include_str!("../../prompt_data/field_categories.ron");

/// The pack every custom selection includes.
pub const CORE_PACK: &str = "core";

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("unknown pack: {0}")]
    UnknownPack(String),
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error(transparent)]
    Pick(#[from] PickError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCategory {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub fields: Vec<WizardField>,
}

/// Categories in display order, packs (pack → categories), and presets
/// (preset → packs).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldCatalog {
    pub categories: Vec<FieldCategory>,
    #[serde(default)]
    pub packs: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub presets: IndexMap<String, Vec<String>>,
}

impl FieldCatalog {
    /// The catalog compiled into the crate.
    pub fn builtin() -> Result<FieldCatalog, FieldError> {
        Self::parse_ron(BUILTIN_FIELDS)
    }

    pub fn load_from_ron(path: &Path) -> Result<FieldCatalog, FieldError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<FieldCatalog, FieldError> {
        Ok(ron::from_str(input)?)
    }

    pub fn category(&self, name: &str) -> Option<&FieldCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn preset_names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    pub fn pack_names(&self) -> Vec<&str> {
        self.packs.keys().map(String::as_str).collect()
    }

    /// Category names for a preset, first occurrence wins.
    pub fn categories_for_preset(&self, preset: &str) -> Result<Vec<String>, FieldError> {
        let packs = self
            .presets
            .get(preset)
            .ok_or_else(|| FieldError::UnknownPreset(preset.to_string()))?;
        self.collect_packs(packs.iter().map(String::as_str))
    }

    /// Category names for a custom pack selection. The core pack is always
    /// included, and always first.
    pub fn categories_for_packs<S: AsRef<str>>(
        &self,
        packs: &[S],
    ) -> Result<Vec<String>, FieldError> {
        self.collect_packs(std::iter::once(CORE_PACK).chain(packs.iter().map(AsRef::as_ref)))
    }

    fn collect_packs<'a>(
        &self,
        packs: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<String>, FieldError> {
        let mut names = IndexSet::new();
        for pack in packs {
            let categories = self
                .packs
                .get(pack)
                .ok_or_else(|| FieldError::UnknownPack(pack.to_string()))?;
            names.extend(categories.iter().cloned());
        }
        Ok(names.into_iter().collect())
    }

    /// Look up categories by name, keeping the given order.
    pub fn resolve<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<&FieldCategory>, FieldError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.category(name)
                    .ok_or_else(|| FieldError::UnknownCategory(name.to_string()))
            })
            .collect()
    }

    /// Fill every field of the named categories with `picker(key, suggestions)`
    /// and write the answers into a prompt record. List fields get a
    /// one-element list.
    pub fn random_prompt<S, F>(
        &self,
        names: &[S],
        mut picker: F,
    ) -> Result<ImagePrompt, FieldError>
    where
        S: AsRef<str>,
        F: FnMut(&str, &[String]) -> Result<String, PickError>,
    {
        let mut answers = Vec::new();
        for category in self.resolve(names)? {
            for field in &category.fields {
                let value = picker(&field.key, &field.suggestions)?;
                let value = if field.multiple {
                    Value::Array(vec![Value::String(value)])
                } else {
                    Value::String(value)
                };
                answers.push((field.key.as_str(), value));
            }
        }

        tracing::debug!(
            categories = names.len(),
            fields = answers.len(),
            "filled prompt fields"
        );
        Ok(ImagePrompt::from_fields(answers)?)
    }
}
