//! Integration tests for entity-to-config extraction.
//!
//! Covers the full paragraph -> modifier paragraphs -> media chain:
//! - Nested configs grouped per bundle
//! - Media references bridged to file URLs
//! - Idempotence when a partial config is fed back in
//! - Mapping alterations registered on the extractor

use std::sync::Arc;

use modifiers_config::{
    EntityConfigExtractor, FieldItem, FieldStorage, MappingTable, MemoryEntity, MemoryField,
};
use modifiers_types::{ConfigTree, Scalar};
use serde_json::json;

fn hero_image_media() -> MemoryEntity {
    MemoryEntity::new("media", "image").with_field(MemoryField::image(
        "field_media_image",
        vec![MemoryEntity::file("/sites/default/files/hero.jpg")],
    ))
}

fn bg_color_modifier(color: &str) -> MemoryEntity {
    MemoryEntity::new("paragraph", "bg_color")
        .with_field(MemoryField::text("id", 7_i64).base_field())
        .with_field(MemoryField::text("field_mod_media", "all"))
        .with_field(MemoryField::color("field_mod_bg_color", color, 0.8))
}

fn bg_image_modifier() -> MemoryEntity {
    MemoryEntity::new("paragraph", "bg_image")
        .with_field(MemoryField::text("field_mod_media", "(min-width: 768px)"))
        .with_field(MemoryField::reference("field_mod_image", vec![hero_image_media()]))
}

fn hero_paragraph(modifiers: Vec<MemoryEntity>) -> MemoryEntity {
    MemoryEntity::new("paragraph", "hero")
        .with_field(MemoryField::text("field_title", "Welcome"))
        .with_field(MemoryField::reference("field_modifiers", modifiers).multiple(true))
}

#[test]
fn extracts_nested_bundles() {
    let hero = hero_paragraph(vec![
        bg_color_modifier("#336699"),
        bg_image_modifier(),
        bg_color_modifier("#fff"),
    ]);

    let config =
        EntityConfigExtractor::new().extract_entity(&hero, "field_modifiers", ConfigTree::new());

    assert_eq!(
        serde_json::to_value(&config).unwrap(),
        json!({
            "modifiers": {
                "bg_color": [
                    {"media": "all", "bg_color": "rgba(51,102,153,0.8)"},
                    {"media": "all", "bg_color": "rgba(255,255,255,0.8)"}
                ],
                "bg_image": [
                    {"media": "(min-width: 768px)", "image": "/sites/default/files/hero.jpg"}
                ]
            }
        })
    );
}

#[test]
fn second_pass_does_not_duplicate_bundles() {
    let hero = hero_paragraph(vec![bg_color_modifier("#000"), bg_image_modifier()]);
    let extractor = EntityConfigExtractor::new();

    let once = extractor.extract_entity(&hero, "field_modifiers", ConfigTree::new());
    let twice = extractor.extract_entity(&hero, "field_modifiers", once.clone());

    assert_eq!(once, twice);
    let bundles = twice.bundles("modifiers").unwrap();
    assert_eq!(bundles["bg_color"].len(), 1);
    assert_eq!(bundles["bg_image"].len(), 1);
}

#[test]
fn already_present_bundle_is_skipped_but_new_bundle_is_added() {
    let hero = hero_paragraph(vec![bg_color_modifier("#000"), bg_image_modifier()]);
    let extractor = EntityConfigExtractor::new();

    let partial = extractor.extract_entity(
        &hero_paragraph(vec![bg_color_modifier("#fff")]),
        "field_modifiers",
        ConfigTree::new(),
    );
    let merged = extractor.extract_entity(&hero, "field_modifiers", partial);

    let bundles = merged.bundles("modifiers").unwrap();
    assert_eq!(bundles.keys().collect::<Vec<_>>(), ["bg_color", "bg_image"]);
    // The pre-existing bg_color entry is kept, not re-extracted
    assert_eq!(
        bundles["bg_color"][0].text("bg_color").as_deref(),
        Some("rgba(255,255,255,0.8)")
    );
    assert_eq!(bundles["bg_color"].len(), 1);
}

#[test]
fn extract_entity_all_collects_every_field() {
    let hero = hero_paragraph(vec![bg_color_modifier("#000")])
        .with_field(MemoryField::text("uuid", "1234").base_field());

    let config = EntityConfigExtractor::new().extract_entity_all(&hero, ConfigTree::new());

    assert_eq!(config.keys().collect::<Vec<_>>(), ["title", "modifiers"]);
    assert_eq!(config.text("title").as_deref(), Some("Welcome"));
}

#[test]
fn alteration_routes_custom_media_bundle() {
    let slideshow = MemoryEntity::new("media", "slideshow")
        .with_field(MemoryField::new("field_caption", FieldStorage::new("string", "value")))
        .with_field(
            MemoryField::new("field_slide_url", FieldStorage::new("link", "uri"))
                .with_item(FieldItem::new().with("uri", "https://example.com/slide-1"))
                .with_item(FieldItem::new().with("uri", "https://example.com/slide-2"))
                .multiple(true),
        );
    let modifier = MemoryEntity::new("paragraph", "slides").with_field(
        MemoryField::reference("field_mod_slides", vec![slideshow]).multiple(true),
    );
    let hero = hero_paragraph(vec![modifier]);

    let plain =
        EntityConfigExtractor::new().extract_entity(&hero, "field_modifiers", ConfigTree::new());
    let slides = &plain.bundles("modifiers").unwrap()["slides"][0];
    // No mapping for media.slideshow yet: the multi-valued field resolves to an empty list
    assert!(slides.scalars("slides").is_empty());
    assert!(slides.contains_key("slides"));

    let overrides = MappingTable::from_yaml_str(
        "media:\n  slideshow: [field_caption, field_slide_url]\n",
    )
    .unwrap();
    let extractor = EntityConfigExtractor::new().with_alteration(Arc::new(overrides));
    let altered = extractor.extract_entity(&hero, "field_modifiers", ConfigTree::new());
    let slides = &altered.bundles("modifiers").unwrap()["slides"][0];

    // field_caption is present but empty, so field_slide_url is used
    assert_eq!(
        slides.scalars("slides"),
        vec![
            Scalar::from("https://example.com/slide-1"),
            Scalar::from("https://example.com/slide-2"),
        ]
    );
}
