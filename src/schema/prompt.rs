//! The prompt record — a sparse, nested description of the image to generate.
//!
//! Every leaf is optional. `None` means "not specified"; `Some(String::new())`
//! is an explicit empty value and survives cleaning.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::nested::{get_nested, merge_values, set_nested};

/// Whether the prompt asks for a fresh image or an edit of an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    #[default]
    Generate,
    Edit,
}

impl PromptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Edit => "edit",
        }
    }
}

/// Camera framing and lens behavior.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Option<String>,
    pub direction: Option<String>,
    /// Focal length, e.g. "35mm". Rendered as "{lens_mm} lens".
    pub lens_mm: Option<String>,
    pub aperture: Option<String>,
    pub angle: Option<String>,
    pub angle_reference: Option<String>,
    pub psychological_intent: Option<String>,
    pub lens_characteristics: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hair {
    pub style: Option<String>,
    /// Only rendered when it differs from `style`.
    pub structure: Option<String>,
    pub behavior: Option<String>,
    pub engineering: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Face {
    pub makeup: Option<String>,
    pub features: Option<String>,
    pub expression: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Clothing {
    pub main_garment: Option<String>,
    pub structure: Option<String>,
    pub hardware: Option<String>,
    pub finish: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Accessories {
    pub hands: Option<String>,
    pub jewelry: Option<String>,
    pub ankles: Option<String>,
    pub footwear: Option<String>,
}

/// The primary subject of the image.
///
/// `action` takes precedence over `body_position` in prose rendering; when
/// both are set only `action` is used.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subject {
    pub description: Option<String>,
    pub hair: Option<Hair>,
    pub face: Option<Face>,
    pub action: Option<String>,
    pub body_position: Option<String>,
    pub clothing: Option<Clothing>,
    pub accessories: Option<Accessories>,
    pub movement: Option<String>,
}

/// Background crowd or bystanders, placed by frame position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrowdElements {
    pub description: Option<String>,
    pub foreground_left: Option<String>,
    pub foreground_right: Option<String>,
    pub lower_left: Option<String>,
    pub foreground_mass: Option<String>,
    pub behavior: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub location: Option<String>,
    pub lighting_fixtures: Option<String>,
    pub surfaces: Option<String>,
    pub seating: Option<String>,
    pub signage: Option<String>,
    pub windows: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lighting {
    pub primary_source: Option<String>,
    pub primary_effect: Option<String>,
    pub secondary_source: Option<String>,
    pub secondary_effect: Option<String>,
    pub ambient: Option<String>,
    pub direction: Option<String>,
    pub quality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    pub elements: Option<String>,
    pub behavior: Option<String>,
    pub air_quality: Option<String>,
    pub mood: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Composition {
    pub foreground: Option<String>,
    pub midground: Option<String>,
    pub background: Option<String>,
    pub depth_layers: Option<String>,
    pub framing_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub grade: Option<String>,
    pub highlights: Option<String>,
    pub skin_tone: Option<String>,
    pub blacks: Option<String>,
    pub palette: Option<Vec<String>>,
}

/// Analog film stock and texture simulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmTexture {
    pub grain: Option<String>,
    pub flash_artifacts: Option<String>,
    pub motion: Option<String>,
    pub lens_quality: Option<String>,
    /// `"none"` suppresses the date stamp in prose output.
    pub date_stamp: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Technical {
    pub aspect_ratio: Option<String>,
    pub realism_note: Option<String>,
}

/// Scene-level wrapper grouping the camera with global effects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub effect_type: Option<String>,
    pub camera: Option<Camera>,
}

/// The root prompt record. Only `prompt_type` is always present.
///
/// The record is built once (from template defaults, presets, user edits),
/// rendered, and thrown away. It is never mutated by the renderers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePrompt {
    pub prompt_type: PromptType,
    pub scene: Option<Scene>,
    pub subject: Option<Subject>,
    pub crowd_elements: Option<CrowdElements>,
    pub environment: Option<Environment>,
    pub lighting: Option<Lighting>,
    pub atmosphere: Option<Atmosphere>,
    pub composition: Option<Composition>,
    pub color: Option<Color>,
    pub film_texture: Option<FilmTexture>,
    pub technical: Option<Technical>,
    pub vibes: Option<Vec<String>>,
    pub semantic_negatives: Option<String>,
}

impl ImagePrompt {
    pub fn new(prompt_type: PromptType) -> Self {
        Self {
            prompt_type,
            ..Self::default()
        }
    }

    /// Convert to a JSON value. Unspecified fields come out as `null` and are
    /// left for the cleaner to prune.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Deep-merge `overlay` on top of `self`. Leaves specified in the overlay
    /// win; leaves it leaves unspecified keep their value from `self`.
    pub fn merged(&self, overlay: &ImagePrompt) -> Result<ImagePrompt, serde_json::Error> {
        let merged = merge_values(&self.to_value()?, &overlay.to_value()?);
        serde_json::from_value(merged)
    }

    /// Build a prompt from `(dot path, value)` answers such as
    /// `("subject.hair.style", "slicked back")`. A later answer for the same
    /// path replaces an earlier one. Paths that name no prompt field are
    /// ignored; values of the wrong shape are an error.
    pub fn from_fields<I, K>(fields: I) -> Result<ImagePrompt, serde_json::Error>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut doc = Value::Object(Map::new());
        for (path, value) in fields {
            set_nested(&mut doc, path.as_ref(), value);
        }
        serde_json::from_value(doc)
    }

    /// The value at a dot path, or `None` when it is unspecified.
    pub fn field(&self, path: &str) -> Result<Option<Value>, serde_json::Error> {
        let doc = self.to_value()?;
        Ok(get_nested(&doc, path).filter(|v| !v.is_null()).cloned())
    }
}
