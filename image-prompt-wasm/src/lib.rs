//! WASM bindings for image-prompt — powers the web wizard.

use wasm_bindgen::prelude::*;

use image_prompt::core::diversity::{DiversePicker, DEFAULT_RECENT_WINDOW};
use image_prompt::core::random::{build_random_prompt, flatten_prompt_to_text, RandomPrompt};
use image_prompt::core::render::{
    generate_compact_json, generate_json, generate_natural_language,
};
use image_prompt::schema::category::{CategoryCatalog, ModelKind, WizardCategory};
use image_prompt::schema::fields::FieldCatalog;
use image_prompt::schema::prompt::ImagePrompt;
use image_prompt::templates::TemplateSet;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct TemplateInfo<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(serde::Serialize)]
struct PresetInfo<'a> {
    name: &'a str,
    categories: Vec<String>,
}

#[derive(serde::Serialize)]
struct RandomOutput {
    json: String,
    text: String,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn parse_prompt(prompt_json: &str) -> Result<ImagePrompt, JsError> {
    serde_json::from_str(prompt_json)
        .map_err(|e| JsError::new(&format!("Invalid prompt JSON: {e}")))
}

fn parse_model(s: &str) -> ModelKind {
    match s.to_lowercase().as_str() {
        "video" => ModelKind::Video,
        _ => ModelKind::Image,
    }
}

/// An absent window means the default; zero is kept and disables history.
fn window_or_default(window: Option<usize>) -> usize {
    window.unwrap_or(DEFAULT_RECENT_WINDOW)
}

fn builtin_templates() -> Result<TemplateSet, JsError> {
    TemplateSet::builtin().map_err(|e| JsError::new(&format!("Template load error: {e}")))
}

// ---------------------------------------------------------------------------
// Stateless rendering
// ---------------------------------------------------------------------------

/// Render a prompt (JSON string) to cleaned JSON, pretty or compact.
#[wasm_bindgen]
pub fn render_json(prompt_json: &str, pretty: bool) -> Result<String, JsError> {
    let prompt = parse_prompt(prompt_json)?;
    let rendered = if pretty {
        generate_json(&prompt)
    } else {
        generate_compact_json(&prompt)
    };
    rendered.map_err(|e| JsError::new(&format!("Render error: {e}")))
}

/// Render a prompt (JSON string) as one natural-language paragraph.
#[wasm_bindgen]
pub fn render_natural(prompt_json: &str) -> Result<String, JsError> {
    Ok(generate_natural_language(&parse_prompt(prompt_json)?))
}

/// Return a JSON array of `{name, description}` for the built-in templates.
#[wasm_bindgen]
pub fn list_templates() -> Result<String, JsError> {
    let templates = builtin_templates()?;
    let infos: Vec<TemplateInfo<'_>> = templates
        .list()
        .into_iter()
        .map(|(name, description)| TemplateInfo { name, description })
        .collect();
    serde_json::to_string(&infos).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

/// Return the cleaned JSON of a built-in template's prompt.
#[wasm_bindgen]
pub fn template_json(name: &str) -> Result<String, JsError> {
    let templates = builtin_templates()?;
    let template = templates
        .get(name)
        .ok_or_else(|| JsError::new(&format!("Unknown template: {name}")))?;
    generate_json(&template.prompt).map_err(|e| JsError::new(&format!("Render error: {e}")))
}

/// Return a JSON array of `{name, categories}` for the built-in presets.
#[wasm_bindgen]
pub fn list_presets() -> Result<String, JsError> {
    let fields = FieldCatalog::builtin()
        .map_err(|e| JsError::new(&format!("Field catalog load error: {e}")))?;
    let presets = fields
        .preset_names()
        .into_iter()
        .map(|name| {
            Ok(PresetInfo {
                name,
                categories: fields.categories_for_preset(name)?,
            })
        })
        .collect::<Result<Vec<_>, image_prompt::schema::fields::FieldError>>()
        .map_err(|e| JsError::new(&e.to_string()))?;
    serde_json::to_string(&presets).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// Stateful random generation
// ---------------------------------------------------------------------------

/// Random prompt generator with its own per-field pick history. Create one
/// per wizard session.
#[wasm_bindgen]
pub struct RandomPromptGenerator {
    picker: DiversePicker,
    categories: Vec<WizardCategory>,
    fields: FieldCatalog,
}

#[wasm_bindgen]
impl RandomPromptGenerator {
    /// `model` is `"image"` or `"video"`. Without a `window` the default is
    /// used; a window of 0 keeps no history at all.
    #[wasm_bindgen(constructor)]
    pub fn new(
        model: &str,
        seed: u64,
        window: Option<usize>,
    ) -> Result<RandomPromptGenerator, JsError> {
        let catalog = CategoryCatalog::builtin()
            .map_err(|e| JsError::new(&format!("Category load error: {e}")))?;
        let fields = FieldCatalog::builtin()
            .map_err(|e| JsError::new(&format!("Field catalog load error: {e}")))?;
        Ok(RandomPromptGenerator {
            picker: DiversePicker::builder()
                .window_size(window_or_default(window))
                .seed(seed)
                .build(),
            categories: catalog.categories_for(parse_model(model)),
            fields,
        })
    }

    /// Generate one random prompt. Returns `{"json": ..., "text": ...}`.
    pub fn generate(&mut self) -> Result<String, JsError> {
        let prompt = self.next_prompt()?;
        let output = RandomOutput {
            json: prompt
                .to_json(true)
                .map_err(|e| JsError::new(&format!("Serialization error: {e}")))?,
            text: flatten_prompt_to_text(&prompt),
        };
        serde_json::to_string(&output)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Fill a full prompt record from a preset (`quick`, `standard`, ...).
    /// Returns `{"json": ..., "text": ...}` with the cleaned JSON and the
    /// natural-language rendering.
    pub fn generate_preset(&mut self, preset: &str) -> Result<String, JsError> {
        let names = self
            .fields
            .categories_for_preset(preset)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let picker = &mut self.picker;
        let prompt = self
            .fields
            .random_prompt(&names, |key, options| picker.pick(key, options))
            .map_err(|e| JsError::new(&format!("Pick error: {e}")))?;
        let output = RandomOutput {
            json: generate_json(&prompt)
                .map_err(|e| JsError::new(&format!("Render error: {e}")))?,
            text: generate_natural_language(&prompt),
        };
        serde_json::to_string(&output)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return the recent picks for a field key as a JSON array.
    pub fn history(&self, field_key: &str) -> String {
        serde_json::to_string(self.picker.history(field_key)).unwrap_or_else(|_| "[]".to_string())
    }

    /// Forget all pick history.
    pub fn reset(&mut self) {
        self.picker.clear();
    }
}

// Private helpers
impl RandomPromptGenerator {
    fn next_prompt(&mut self) -> Result<RandomPrompt, JsError> {
        let picker = &mut self.picker;
        build_random_prompt(&self.categories, |key, options| picker.pick(key, options))
            .map_err(|e| JsError::new(&format!("Pick error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_window_is_passed_through() {
        assert_eq!(window_or_default(Some(0)), 0);
        assert_eq!(window_or_default(Some(8)), 8);
        assert_eq!(window_or_default(None), DEFAULT_RECENT_WINDOW);
    }
}
