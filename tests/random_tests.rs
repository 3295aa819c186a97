/// Random assembly integration tests — built-in catalog, diverse picker,
/// and the text/JSON outputs together.

use image_prompt::core::diversity::{pick_with_history, DiversePicker, PickError};
use image_prompt::core::random::{build_random_prompt, flatten_prompt_to_text};
use image_prompt::core::render::{cleaned_value, generate_natural_language};
use image_prompt::schema::category::{CategoryCatalog, ModelKind};
use image_prompt::schema::fields::FieldCatalog;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn seeded_picker(seed: u64) -> DiversePicker {
    DiversePicker::builder().window_size(5).seed(seed).build()
}

#[test]
fn every_field_of_the_image_catalog_gets_a_suggestion() {
    let catalog = CategoryCatalog::builtin().unwrap();
    let categories = catalog.categories_for(ModelKind::Image);
    let mut picker = seeded_picker(7);

    let prompt =
        build_random_prompt(&categories, |key, options| picker.pick(key, options)).unwrap();

    for category in &categories {
        for field in &category.fields {
            let (group, sub_key) = field.key.split_once('.').unwrap();
            let value = prompt
                .get(group, sub_key)
                .unwrap_or_else(|| panic!("{} missing", field.key));
            assert!(field.suggestions.iter().any(|s| s == value));
        }
    }
}

#[test]
fn style_category_lands_under_clothing_group() {
    let catalog = CategoryCatalog::builtin().unwrap();
    let mut picker = seeded_picker(1);
    let prompt = build_random_prompt(&catalog.categories_for(ModelKind::Image), |key, options| {
        picker.pick(key, options)
    })
    .unwrap();

    assert!(prompt.groups.contains_key("clothing"));
    assert!(!prompt.groups.contains_key("style"));
}

#[test]
fn same_seed_same_prompts() {
    let catalog = CategoryCatalog::builtin().unwrap();
    let categories = catalog.categories_for(ModelKind::Video);

    let run = |seed: u64| {
        let mut picker = seeded_picker(seed);
        (0..3)
            .map(|_| {
                let prompt =
                    build_random_prompt(&categories, |key, options| picker.pick(key, options))
                        .unwrap();
                prompt.to_json(false).unwrap()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn consecutive_prompts_do_not_repeat_within_the_window() {
    let catalog = CategoryCatalog::builtin().unwrap();
    let categories = catalog.categories_for(ModelKind::Image);
    let mut picker = seeded_picker(2024);

    // Fields with more suggestions than the window never repeat back to back.
    let wide: Vec<(String, usize)> = categories
        .iter()
        .flat_map(|c| c.fields.iter())
        .filter(|f| f.suggestions.len() > 5)
        .map(|f| (f.key.clone(), f.suggestions.len()))
        .collect();
    assert!(!wide.is_empty());

    let mut previous = None;
    for _ in 0..4 {
        let prompt =
            build_random_prompt(&categories, |key, options| picker.pick(key, options)).unwrap();
        if let Some(previous) = previous.replace(prompt.clone()) {
            for (key, _) in &wide {
                let (group, sub_key) = key.split_once('.').unwrap();
                assert_ne!(
                    prompt.get(group, sub_key),
                    previous.get(group, sub_key),
                    "{} repeated",
                    key
                );
            }
        }
    }
}

#[test]
fn window_history_stays_bounded_and_per_key() {
    let catalog = CategoryCatalog::builtin().unwrap();
    let categories = catalog.categories_for(ModelKind::Image);
    let mut picker: DiversePicker = DiversePicker::builder().window_size(2).seed(3).build();

    for _ in 0..6 {
        build_random_prompt(&categories, |key, options| picker.pick(key, options)).unwrap();
    }
    for field in categories.iter().flat_map(|c| c.fields.iter()) {
        assert_eq!(picker.history(&field.key).len(), 2, "{}", field.key);
    }
    assert!(picker.history("no.such.field").is_empty());
}

#[test]
fn flattened_text_joins_every_value() {
    let catalog = CategoryCatalog::builtin().unwrap();
    let categories = catalog.categories_for(ModelKind::Video);
    let field_count: usize = categories.iter().map(|c| c.fields.len()).sum();
    let mut picker = seeded_picker(11);

    let prompt =
        build_random_prompt(&categories, |key, options| picker.pick(key, options)).unwrap();
    let text = flatten_prompt_to_text(&prompt);

    assert!(!text.is_empty());
    assert!(!text.ends_with(", "));
    let values: usize = prompt.groups.values().map(|g| g.len()).sum();
    assert_eq!(values, field_count);
}

#[test]
fn history_walk_covers_pool_before_repeating() {
    let options: Vec<&str> = vec!["a", "b", "c", "d"];
    let mut rng = StdRng::seed_from_u64(5);
    let mut recent = Vec::new();
    let mut seen = HashSet::new();

    for _ in 0..options.len() {
        let picked = pick_with_history(&options, &recent, 3, &mut rng).unwrap();
        seen.insert(picked.value);
        recent = picked.recent;
    }
    assert_eq!(seen.len(), options.len());
}

#[test]
fn empty_suggestion_pool_fails_the_whole_prompt() {
    let catalog = CategoryCatalog::parse_ron(
        r#"(image: [(id: "broken", name: "Broken", fields: [(key: "broken.field", label: "Broken")])])"#,
    )
    .unwrap();
    let mut picker = seeded_picker(0);
    let result = build_random_prompt(&catalog.categories_for(ModelKind::Image), |key, options| {
        picker.pick(key, options)
    });
    assert_eq!(result, Err(PickError::EmptyOptions));
}

#[test]
fn blank_category_survives_in_serialized_output() {
    let catalog = CategoryCatalog::parse_ron(
        r#"(image: [
            (id: "blank", name: "Blank"),
            (id: "s", name: "Subject", fields: [(key: "subject.description", label: "Subject", suggestions: ["a cat"])]),
        ])"#,
    )
    .unwrap();
    let mut picker = seeded_picker(0);
    let prompt = build_random_prompt(&catalog.categories_for(ModelKind::Image), |key, options| {
        picker.pick(key, options)
    })
    .unwrap();

    assert_eq!(
        prompt.to_json(false).unwrap(),
        r#"{"blank":{},"subject":{"description":"a cat"}}"#
    );
    assert_eq!(
        prompt.to_cleaned_json(false).unwrap(),
        r#"{"subject":{"description":"a cat"}}"#
    );
}

#[test]
fn street_preset_fills_a_prompt_that_renders() {
    let fields = FieldCatalog::builtin().unwrap();
    let names = fields.categories_for_preset("street").unwrap();
    let mut picker = seeded_picker(8);

    let prompt = fields
        .random_prompt(&names, |key, options| picker.pick(key, options))
        .unwrap();
    let value = cleaned_value(&prompt).unwrap();

    for group in ["subject", "scene", "environment", "crowd_elements", "atmosphere", "film_texture"] {
        assert!(value.get(group).is_some(), "{} missing", group);
    }
    assert!(value.get("composition").is_none());
    assert_eq!(prompt.vibes.as_ref().map(Vec::len), Some(1));

    let prose = generate_natural_language(&prompt);
    assert!(prose.chars().next().unwrap().is_uppercase());
    assert!(prose.contains(" in "));
    assert!(prose.ends_with('.'));
}

#[test]
fn preset_picks_rotate_across_calls() {
    let fields = FieldCatalog::builtin().unwrap();
    let names = fields.categories_for_preset("quick").unwrap();
    let mut picker = seeded_picker(21);

    let mut subjects = HashSet::new();
    for _ in 0..5 {
        let prompt = fields
            .random_prompt(&names, |key, options| picker.pick(key, options))
            .unwrap();
        subjects.insert(prompt.subject.unwrap().description.unwrap());
    }
    assert_eq!(subjects.len(), 5);
    assert_eq!(picker.history("subject.description").len(), 5);
}
