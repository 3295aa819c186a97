//! Prompt sections — pure extractors that turn one slice of an
//! [`ImagePrompt`] into natural-language fragments.
//!
//! Each section returns an empty `Vec` when it has nothing to say. The order
//! of [`PROMPT_SECTIONS`] is the order fragments appear in the final prose,
//! so reordering it changes the output.

use crate::schema::prompt::ImagePrompt;

/// Extracts zero or more fragments from a prompt.
pub type PromptSection = fn(&ImagePrompt) -> Vec<String>;

/// Date stamp value that means "no date stamp".
const NO_DATE_STAMP: &str = "none";

/// A field contributes to prose only when it is set and non-empty.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// The subject description, the seed of every prompt.
pub fn subject_section(prompt: &ImagePrompt) -> Vec<String> {
    prompt
        .subject
        .as_ref()
        .and_then(|subject| present(&subject.description))
        .map(|description| vec![description.to_string()])
        .unwrap_or_default()
}

/// Hair style, then structure in parentheses when it differs from the style.
pub fn hair_section(prompt: &ImagePrompt) -> Vec<String> {
    let Some(hair) = prompt.subject.as_ref().and_then(|s| s.hair.as_ref()) else {
        return Vec::new();
    };

    let mut parts = Vec::new();
    if let Some(style) = present(&hair.style) {
        parts.push(format!("with {}", style));
    }
    if let Some(structure) = present(&hair.structure) {
        if hair.style.as_deref() != Some(structure) {
            parts.push(format!("({})", structure));
        }
    }
    parts
}

/// "wearing {main_garment}", optionally followed by "with {hardware}".
/// Hardware on its own says nothing.
pub fn clothing_section(prompt: &ImagePrompt) -> Vec<String> {
    let Some(clothing) = prompt.subject.as_ref().and_then(|s| s.clothing.as_ref()) else {
        return Vec::new();
    };
    let Some(garment) = present(&clothing.main_garment) else {
        return Vec::new();
    };

    let mut parts = vec![format!("wearing {}", garment)];
    if let Some(hardware) = present(&clothing.hardware) {
        parts.push(format!("with {}", hardware));
    }
    parts
}

/// The action, or the body position when no action is given.
pub fn action_section(prompt: &ImagePrompt) -> Vec<String> {
    let Some(subject) = prompt.subject.as_ref() else {
        return Vec::new();
    };
    present(&subject.action)
        .or_else(|| present(&subject.body_position))
        .map(|text| vec![text.to_string()])
        .unwrap_or_default()
}

pub fn environment_section(prompt: &ImagePrompt) -> Vec<String> {
    prompt
        .environment
        .as_ref()
        .and_then(|env| present(&env.location))
        .map(|location| vec![format!("in {}", location)])
        .unwrap_or_default()
}

/// Hands, jewelry, and footwear folded into a single "with ..." fragment.
/// Ankle accessories are not rendered.
pub fn accessories_section(prompt: &ImagePrompt) -> Vec<String> {
    let Some(acc) = prompt.subject.as_ref().and_then(|s| s.accessories.as_ref()) else {
        return Vec::new();
    };

    let parts: Vec<&str> = [&acc.hands, &acc.jewelry, &acc.footwear]
        .into_iter()
        .filter_map(present)
        .collect();
    if parts.is_empty() {
        return Vec::new();
    }
    vec![format!("with {}", parts.join(", "))]
}

pub fn camera_section(prompt: &ImagePrompt) -> Vec<String> {
    let Some(cam) = prompt.scene.as_ref().and_then(|s| s.camera.as_ref()) else {
        return Vec::new();
    };

    let mut parts = Vec::new();
    if let Some(position) = present(&cam.position) {
        parts.push(format!("shot from {}", position));
    }
    if let Some(lens) = present(&cam.lens_mm) {
        parts.push(format!("{} lens", lens));
    }
    if parts.is_empty() {
        return Vec::new();
    }
    vec![parts.join(", ")]
}

/// Primary source and primary effect as separate fragments.
pub fn lighting_section(prompt: &ImagePrompt) -> Vec<String> {
    let Some(light) = prompt.lighting.as_ref() else {
        return Vec::new();
    };
    [&light.primary_source, &light.primary_effect]
        .into_iter()
        .filter_map(present)
        .map(str::to_string)
        .collect()
}

pub fn atmosphere_section(prompt: &ImagePrompt) -> Vec<String> {
    let Some(atmosphere) = prompt.atmosphere.as_ref() else {
        return Vec::new();
    };
    [&atmosphere.mood, &atmosphere.elements]
        .into_iter()
        .filter_map(present)
        .map(str::to_string)
        .collect()
}

/// Grain, lens quality, and date stamp in one comma-separated fragment.
pub fn film_texture_section(prompt: &ImagePrompt) -> Vec<String> {
    let Some(film) = prompt.film_texture.as_ref() else {
        return Vec::new();
    };

    let mut parts: Vec<String> = [&film.grain, &film.lens_quality]
        .into_iter()
        .filter_map(present)
        .map(str::to_string)
        .collect();
    if let Some(stamp) = present(&film.date_stamp).filter(|s| *s != NO_DATE_STAMP) {
        parts.push(format!("date stamp {}", stamp));
    }
    if parts.is_empty() {
        return Vec::new();
    }
    vec![parts.join(", ")]
}

/// Phrasing depends on how many references there are:
/// 1 → "X aesthetic", 2 → "X meets Y energy", 3+ → "X, Y and Z influences".
pub fn vibes_section(prompt: &ImagePrompt) -> Vec<String> {
    let vibes = prompt.vibes.as_deref().unwrap_or_default();
    match vibes {
        [] => Vec::new(),
        [only] => vec![format!("{} aesthetic", only)],
        [first, second] => vec![format!("{} meets {} energy", first, second)],
        [init @ .., last] => vec![format!("{} and {} influences", init.join(", "), last)],
    }
}

pub fn technical_section(prompt: &ImagePrompt) -> Vec<String> {
    prompt
        .technical
        .as_ref()
        .and_then(|t| present(&t.aspect_ratio))
        .map(|ratio| vec![format!("{} aspect ratio", ratio)])
        .unwrap_or_default()
}

pub fn color_section(prompt: &ImagePrompt) -> Vec<String> {
    prompt
        .color
        .as_ref()
        .and_then(|c| present(&c.grade))
        .map(|grade| vec![grade.to_string()])
        .unwrap_or_default()
}

/// All sections in output order.
pub const PROMPT_SECTIONS: [PromptSection; 13] = [
    subject_section,
    hair_section,
    clothing_section,
    action_section,
    environment_section,
    accessories_section,
    camera_section,
    lighting_section,
    atmosphere_section,
    film_texture_section,
    vibes_section,
    technical_section,
    color_section,
];

/// Run every section in order and concatenate their fragments.
pub fn collect_fragments(prompt: &ImagePrompt) -> Vec<String> {
    PROMPT_SECTIONS
        .iter()
        .flat_map(|section| section(prompt))
        .collect()
}
