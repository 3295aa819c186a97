//! Wizard categories — groups of fields, each with a suggestion pool.
//!
//! A field key is a dot path (`"clothing.main"`) whose prefix names the output
//! group. Category ids are display groupings only and may differ from it.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

const BUILTIN_CATEGORIES: &str = include_str!("../../prompt_data/wizard_categories.ron");

/// Number of image categories shared with the video wizard.
const SHARED_WITH_VIDEO: usize = 6;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// One promptable field and its candidate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardField {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    /// The field holds a list; each answer becomes one element.
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<WizardField>,
}

/// Which generator the categories feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Image,
    Video,
}

/// Image categories plus the extra categories only the video wizard asks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCatalog {
    pub image: Vec<WizardCategory>,
    #[serde(default)]
    pub video: Vec<WizardCategory>,
}

impl CategoryCatalog {
    /// The catalog compiled into the crate.
    pub fn builtin() -> Result<CategoryCatalog, CategoryError> {
        Self::parse_ron(BUILTIN_CATEGORIES)
    }

    pub fn load_from_ron(path: &Path) -> Result<CategoryCatalog, CategoryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<CategoryCatalog, CategoryError> {
        Ok(ron::from_str(input)?)
    }

    /// Categories for a model. Video reuses the leading image categories
    /// (subject through mood) and appends its own.
    pub fn categories_for(&self, kind: ModelKind) -> Vec<WizardCategory> {
        match kind {
            ModelKind::Image => self.image.clone(),
            ModelKind::Video => self
                .image
                .iter()
                .take(SHARED_WITH_VIDEO)
                .chain(self.video.iter())
                .cloned()
                .collect(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&WizardCategory> {
        self.image
            .iter()
            .chain(self.video.iter())
            .find(|category| category.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = CategoryCatalog::builtin().unwrap();
        assert_eq!(catalog.image.len(), 9);
        assert_eq!(catalog.video.len(), 2);
        for category in catalog.image.iter().chain(catalog.video.iter()) {
            assert!(!category.fields.is_empty(), "{} has no fields", category.id);
            for field in &category.fields {
                assert!(!field.suggestions.is_empty(), "{} has no suggestions", field.key);
                assert!(field.key.contains('.'), "{} is not a dot path", field.key);
            }
        }
    }

    #[test]
    fn video_shares_leading_image_categories() {
        let catalog = CategoryCatalog::builtin().unwrap();
        let ids: Vec<String> = catalog
            .categories_for(ModelKind::Video)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(
            ids,
            vec!["subject", "setting", "style", "lighting", "camera", "mood", "motion", "duration"]
        );
    }

    #[test]
    fn category_ids_and_groups_diverge() {
        let catalog = CategoryCatalog::builtin().unwrap();
        let style = catalog.find("style").unwrap();
        assert!(style.fields.iter().all(|f| f.key.starts_with("clothing.")));
        assert!(catalog.find("missing").is_none());
    }

    #[test]
    fn parse_minimal_ron_with_defaults() {
        let catalog = CategoryCatalog::parse_ron(
            r#"(image: [(id: "empty", name: "Empty")])"#,
        )
        .unwrap();
        assert_eq!(catalog.image[0].fields.len(), 0);
        assert!(catalog.video.is_empty());
    }

    #[test]
    fn malformed_ron_is_an_error() {
        assert!(matches!(
            CategoryCatalog::parse_ron("(image: [(id: )])"),
            Err(CategoryError::Ron(_))
        ));
    }
}
