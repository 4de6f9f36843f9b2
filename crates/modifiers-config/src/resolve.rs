/*
 * resolve.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Field value resolution.
 */

//! Field value resolution.
//!
//! Two entry points:
//!
//! - [`resolve_simple`] reads a field's own items.
//! - [`resolve_reference`] follows a reference field to each referenced
//!   entity, picks that entity's content field through the
//!   [`MappingTable`], and reads the content field's items.
//!
//! Both collapse to the first value for single-valued fields and keep the
//! whole list for multi-valued ones. Neither fails: anything that cannot
//! be resolved simply contributes no value.

use modifiers_types::{ResolvedValue, Scalar};

use crate::color::hex_to_rgba;
use crate::entity::{FieldHandle, FieldItem, FieldStorage};
use crate::mapping::MappingTable;

/// Opacity assumed when a color item carries none.
const DEFAULT_OPACITY: &str = "1";

/// Extract the value of a non-reference field.
///
/// Color fields yield one `rgba(...)` string per item (empty string for
/// an invalid color). Other fields yield each item's main property;
/// items lacking it are skipped.
pub fn resolve_simple(field: &dyn FieldHandle, storage: &FieldStorage) -> Option<ResolvedValue> {
    if field.is_empty() {
        return None;
    }

    let values = item_values(field.items(), storage);
    ResolvedValue::collapse(values, storage.multiple)
}

/// Extract the value behind a reference field.
///
/// For every referenced entity the mapping table is consulted for its type
/// and bundle. The first candidate field that exists on the entity and is
/// non-empty supplies the values; entities without a mapping or without a
/// usable candidate are skipped. Values from all referenced entities are
/// flattened into one list before collapsing according to the cardinality
/// of the outer field (`storage`).
pub fn resolve_reference(
    field: &dyn FieldHandle,
    storage: &FieldStorage,
    mapping: &MappingTable,
) -> Option<ResolvedValue> {
    if field.is_empty() {
        return None;
    }

    let mut values = Vec::new();
    for entity in field.referenced_entities() {
        let Some(candidates) = mapping.candidates(entity.type_id(), entity.bundle()) else {
            tracing::debug!(
                field = field.name(),
                entity_type = entity.type_id(),
                bundle = entity.bundle(),
                "No field mapping for referenced entity, skipping"
            );
            continue;
        };

        let source = candidates
            .iter()
            .filter_map(|name| entity.field(name))
            .find(|candidate| !candidate.is_empty());

        let Some(source) = source else {
            tracing::debug!(
                field = field.name(),
                entity_type = entity.type_id(),
                bundle = entity.bundle(),
                "No mapped field holds a value, skipping"
            );
            continue;
        };

        values.extend(source_values(source));
    }

    ResolvedValue::collapse(values, storage.multiple)
}

/// Values of the content field picked on a referenced entity.
fn source_values(source: &dyn FieldHandle) -> Vec<Scalar> {
    let storage = source.storage();
    if storage.is_file() {
        source
            .referenced_entities()
            .into_iter()
            .filter_map(|file| file.public_url())
            .map(Scalar::String)
            .collect()
    } else {
        item_values(source.items(), storage)
    }
}

fn item_values(items: &[FieldItem], storage: &FieldStorage) -> Vec<Scalar> {
    if storage.is_color() {
        items
            .iter()
            .map(|item| Scalar::String(color_value(item)))
            .collect()
    } else {
        items
            .iter()
            .filter_map(|item| item.get(&storage.main_property).cloned())
            .collect()
    }
}

fn color_value(item: &FieldItem) -> String {
    let color = item.get("color").map(Scalar::to_string).unwrap_or_default();
    let opacity = item
        .get("opacity")
        .map_or_else(|| DEFAULT_OPACITY.to_string(), Scalar::to_string);
    hex_to_rgba(&color, &opacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityHandle;
    use crate::memory::{MemoryEntity, MemoryField};

    fn field_of<'a>(entity: &'a MemoryEntity, name: &str) -> &'a dyn FieldHandle {
        entity.field(name).unwrap()
    }

    #[test]
    fn test_simple_empty_is_none() {
        let field = MemoryField::new("field_mod_padding", FieldStorage::new("string", "value"));
        assert_eq!(resolve_simple(&field, field.storage()), None);
    }

    #[test]
    fn test_simple_single_takes_first() {
        let field = MemoryField::new("field_size", FieldStorage::new("string", "value"))
            .with_item(FieldItem::new().with("value", "cover"))
            .with_item(FieldItem::new().with("value", "contain"));
        assert_eq!(
            resolve_simple(&field, field.storage()),
            Some(ResolvedValue::Single(Scalar::from("cover")))
        );
    }

    #[test]
    fn test_simple_multiple_keeps_all() {
        let field = MemoryField::new("field_classes", FieldStorage::new("string", "value"))
            .with_item(FieldItem::new().with("value", "a"))
            .with_item(FieldItem::new().with("value", "b"))
            .multiple(true);
        assert_eq!(
            resolve_simple(&field, field.storage()),
            Some(ResolvedValue::List(vec![Scalar::from("a"), Scalar::from("b")]))
        );
    }

    #[test]
    fn test_simple_color() {
        let field = MemoryField::color("field_mod_bg_color", "#000", "0.5");
        assert_eq!(
            resolve_simple(&field, field.storage()),
            Some(ResolvedValue::Single(Scalar::from("rgba(0,0,0,0.5)")))
        );
    }

    #[test]
    fn test_simple_color_without_opacity_is_opaque() {
        let field = MemoryField::new("field_mod_color", FieldStorage::new("color", "color"))
            .with_item(FieldItem::new().with("color", "#fff"));
        assert_eq!(
            resolve_simple(&field, field.storage()),
            Some(ResolvedValue::Single(Scalar::from("rgba(255,255,255,1)")))
        );
    }

    #[test]
    fn test_simple_invalid_color_is_empty_string() {
        let field = MemoryField::color("field_mod_color", "blue", 1.0);
        assert_eq!(
            resolve_simple(&field, field.storage()),
            Some(ResolvedValue::Single(Scalar::from("")))
        );
    }

    #[test]
    fn test_reference_first_present_non_empty_candidate_wins() {
        let media = MemoryEntity::new("media", "image")
            .with_field(MemoryField::image("field_media_image", Vec::new()))
            .with_field(MemoryField::file(
                "field_file",
                vec![MemoryEntity::file("/files/hero.jpg")],
            ));
        let outer = MemoryEntity::new("paragraph", "bg_image")
            .with_field(MemoryField::reference("field_mod_media", vec![media]));
        let mapping = MappingTable::new().with(
            "media",
            "image",
            &["field_media_image", "image", "field_file"],
        );

        let field = field_of(&outer, "field_mod_media");
        assert_eq!(
            resolve_reference(field, field.storage(), &mapping),
            Some(ResolvedValue::Single(Scalar::from("/files/hero.jpg")))
        );
    }

    #[test]
    fn test_reference_earlier_candidate_beats_later() {
        let media = MemoryEntity::new("media", "image")
            .with_field(MemoryField::text("field_file", "later"))
            .with_field(MemoryField::text("image", "earlier"));
        let outer = MemoryEntity::new("paragraph", "p")
            .with_field(MemoryField::reference("field_media", vec![media]));
        let mapping = MappingTable::new().with("media", "image", &["image", "field_file"]);

        let field = field_of(&outer, "field_media");
        assert_eq!(
            resolve_reference(field, field.storage(), &mapping),
            Some(ResolvedValue::Single(Scalar::from("earlier")))
        );
    }

    #[test]
    fn test_reference_flattens_across_entities() {
        let first = MemoryEntity::new("media", "image").with_field(MemoryField::image(
            "field_media_image",
            vec![MemoryEntity::file("/a.jpg"), MemoryEntity::file("/b.jpg")],
        ));
        let unmapped = MemoryEntity::new("media", "slideshow")
            .with_field(MemoryField::text("field_media_image", "ignored"));
        let second = MemoryEntity::new("media", "image").with_field(MemoryField::image(
            "field_media_image",
            vec![MemoryEntity::file("/c.jpg")],
        ));
        let outer = MemoryEntity::new("paragraph", "gallery").with_field(
            MemoryField::reference("field_media", vec![first, unmapped, second]).multiple(true),
        );

        let field = field_of(&outer, "field_media");
        assert_eq!(
            resolve_reference(field, field.storage(), &MappingTable::defaults()),
            Some(ResolvedValue::List(vec![
                Scalar::from("/a.jpg"),
                Scalar::from("/b.jpg"),
                Scalar::from("/c.jpg"),
            ]))
        );

        // Single-valued outer field keeps only the first flattened value
        let single = FieldStorage::new("entity_reference", "target_id");
        assert_eq!(
            resolve_reference(field, &single, &MappingTable::defaults()),
            Some(ResolvedValue::Single(Scalar::from("/a.jpg")))
        );
    }

    #[test]
    fn test_reference_color_source() {
        let term = MemoryEntity::new("taxonomy_term", "palette")
            .with_field(MemoryField::color("field_color", "#ff0000", 1.0));
        let outer = MemoryEntity::new("paragraph", "p")
            .with_field(MemoryField::reference("field_palette", vec![term]));
        let mapping = MappingTable::new().with("taxonomy_term", "palette", &["field_color"]);

        let field = field_of(&outer, "field_palette");
        assert_eq!(
            resolve_reference(field, field.storage(), &mapping),
            Some(ResolvedValue::Single(Scalar::from("rgba(255,0,0,1)")))
        );
    }

    #[test]
    fn test_reference_nothing_resolvable() {
        let media = MemoryEntity::new("media", "image");
        let outer = MemoryEntity::new("paragraph", "p")
            .with_field(MemoryField::reference("field_media", vec![media]));

        let field = field_of(&outer, "field_media");
        assert_eq!(
            resolve_reference(field, field.storage(), &MappingTable::defaults()),
            None
        );
    }
}
