//! Image prompt engine — structured prompts for image generators.
//!
//! Assembles sparse, nested prompt records and renders them two ways: a
//! pruned JSON document and a single natural-language paragraph. Also
//! generates random prompts from per-field suggestion pools while avoiding
//! recently used values.

pub mod core;
pub mod schema;
pub mod templates;

pub use crate::core::cleaner::clean;
pub use crate::core::diversity::{DiversePicker, PickError};
pub use crate::core::render::{generate_compact_json, generate_json, generate_natural_language};
pub use crate::schema::prompt::{ImagePrompt, PromptType};
