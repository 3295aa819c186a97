//! Built-in prompt templates — named starting points that callers merge
//! user edits on top of.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::prompt::ImagePrompt;

const BUILTIN_TEMPLATES: &str = include_str!("../prompt_data/templates.ron");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown template: {0}")]
    NotFound(String),
}

/// A named, described partial prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub prompt: ImagePrompt,
}

/// An ordered set of templates, unique by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateSet {
    templates: Vec<Template>,
}

impl TemplateSet {
    /// The templates compiled into the crate.
    pub fn builtin() -> Result<TemplateSet, TemplateError> {
        Self::parse_ron(BUILTIN_TEMPLATES)
    }

    pub fn load_from_ron(path: &Path) -> Result<TemplateSet, TemplateError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<TemplateSet, TemplateError> {
        let templates: Vec<Template> = ron::from_str(input)?;
        let mut set = TemplateSet::default();
        for template in templates {
            set.insert(template);
        }
        Ok(set)
    }

    /// Add a template, replacing any existing one with the same name in place.
    pub fn insert(&mut self, template: Template) {
        match self.templates.iter_mut().find(|t| t.name == template.name) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    /// Merge another set into this one. Templates from `other` override
    /// templates in `self` with the same name.
    pub fn merge(&mut self, other: TemplateSet) {
        for template in other.templates {
            self.insert(template);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// `(name, description)` pairs in catalog order.
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.templates
            .iter()
            .map(|t| (t.name.as_str(), t.description.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Start from the named template and lay `edits` over it.
    pub fn apply(&self, name: &str, edits: &ImagePrompt) -> Result<ImagePrompt, TemplateError> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        Ok(template.prompt.merged(edits)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::prompt::{PromptType, Subject};

    #[test]
    fn builtin_templates_load_in_order() {
        let set = TemplateSet::builtin().unwrap();
        let names: Vec<&str> = set.list().into_iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "street-photo",
                "studio-portrait",
                "cinematic",
                "fashion-editorial",
                "documentary",
                "surreal"
            ]
        );
    }

    #[test]
    fn street_photo_fields() {
        let set = TemplateSet::builtin().unwrap();
        let street = set.get("street-photo").unwrap();
        assert_eq!(street.description, "Gritty urban, flash, candid energy");
        let camera = street.prompt.scene.as_ref().unwrap().camera.as_ref().unwrap();
        assert_eq!(camera.lens_mm.as_deref(), Some("35mm"));
        assert_eq!(street.prompt.vibes.as_ref().unwrap().len(), 3);
        assert_eq!(street.prompt.prompt_type, PromptType::Generate);
    }

    #[test]
    fn unknown_template() {
        let set = TemplateSet::builtin().unwrap();
        assert!(set.get("nonexistent").is_none());
        assert!(matches!(
            set.apply("nonexistent", &ImagePrompt::default()),
            Err(TemplateError::NotFound(name)) if name == "nonexistent"
        ));
    }

    #[test]
    fn apply_layers_edits_over_template() {
        let set = TemplateSet::builtin().unwrap();
        let edits = ImagePrompt {
            subject: Some(Subject {
                description: Some("a jazz musician".to_string()),
                ..Subject::default()
            }),
            ..ImagePrompt::default()
        };
        let prompt = set.apply("documentary", &edits).unwrap();
        let subject = prompt.subject.unwrap();
        assert_eq!(subject.description.as_deref(), Some("a jazz musician"));
        assert_eq!(subject.action.as_deref(), Some("engaged in real activity"));
    }

    #[test]
    fn merge_overrides_same_name() {
        let mut base = TemplateSet::builtin().unwrap();
        let custom = TemplateSet::parse_ron(
            r#"[(name: "surreal", description: "Custom surreal"), (name: "mine", description: "Mine")]"#,
        )
        .unwrap();
        base.merge(custom);
        assert_eq!(base.len(), 7);
        assert_eq!(base.get("surreal").unwrap().description, "Custom surreal");
        assert_eq!(base.list().last().unwrap().0, "mine");
    }
}
