/*
 * extract.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Entity-to-config extraction.
 */

//! Entity-to-config extraction.
//!
//! The extractor walks one field of an entity and folds its value into a
//! [`ConfigTree`]:
//!
//! - A plain field lands under its short key, unless that key is already
//!   populated.
//! - A reference field becomes a map of bundle name to one nested config
//!   per referenced entity. Each nested config holds every non-base field
//!   of the referenced entity, with reference fields inside it resolved
//!   through the [`MappingTable`].
//!
//! Bundles already present in the incoming tree are never extracted again,
//! so feeding a tree back through the extractor is idempotent.
//!
//! Recursion stops after one reference hop. A nested reference field is
//! resolved to values, not walked, so cyclic entity graphs terminate.

use std::collections::HashSet;
use std::sync::Arc;

use modifiers_types::{ConfigNode, ConfigTree};

use crate::entity::{EntityHandle, FieldHandle};
use crate::field_name::shorten_field_name;
use crate::mapping::{MappingAlter, MappingTable};
use crate::resolve::{resolve_reference, resolve_simple};

/// Builds plugin configuration from content entities.
///
/// Holds the mapping-table alterations registered by collaborators. The
/// effective table is assembled once per top-level call.
#[derive(Clone, Default)]
pub struct EntityConfigExtractor {
    alterations: Vec<Arc<dyn MappingAlter>>,
}

impl EntityConfigExtractor {
    /// Create an extractor that uses the default mapping table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping alteration (builder style).
    pub fn with_alteration(mut self, alteration: Arc<dyn MappingAlter>) -> Self {
        self.add_alteration(alteration);
        self
    }

    /// Register a mapping alteration.
    ///
    /// Alterations apply in registration order; later ones win.
    pub fn add_alteration(&mut self, alteration: Arc<dyn MappingAlter>) {
        self.alterations.push(alteration);
    }

    /// The effective mapping table: defaults plus every alteration.
    pub fn mapping(&self) -> MappingTable {
        MappingTable::assemble(self.alterations.iter().map(|a| a.as_ref()))
    }

    /// Fold one field of `entity` into `config`.
    ///
    /// Returns `config` unchanged if the entity cannot hold fields or does
    /// not have `field_name`.
    pub fn extract_entity(
        &self,
        entity: &dyn EntityHandle,
        field_name: &str,
        config: ConfigTree,
    ) -> ConfigTree {
        let mapping = self.mapping();
        extract_entity_field(entity, field_name, config, &mapping)
    }

    /// Fold every non-base field of `entity` into `config`, in declaration
    /// order.
    pub fn extract_entity_all(&self, entity: &dyn EntityHandle, config: ConfigTree) -> ConfigTree {
        if !entity.is_fieldable() {
            return config;
        }

        let mapping = self.mapping();
        entity
            .fields()
            .into_iter()
            .filter(|field| !field.storage().base_field)
            .fold(config, |config, field| {
                extract_entity_field(entity, field.name(), config, &mapping)
            })
    }

    /// Write one field's resolved value into `config`, overwriting.
    ///
    /// Base fields are ignored.
    pub fn extract_field(&self, field: &dyn FieldHandle, config: &mut ConfigTree) {
        let mapping = self.mapping();
        extract_field_value(field, config, &mapping);
    }
}

impl std::fmt::Debug for EntityConfigExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityConfigExtractor")
            .field("alterations", &self.alterations.len())
            .finish()
    }
}

fn extract_entity_field(
    entity: &dyn EntityHandle,
    field_name: &str,
    mut config: ConfigTree,
    mapping: &MappingTable,
) -> ConfigTree {
    if !entity.is_fieldable() {
        return config;
    }
    let Some(field) = entity.field(field_name) else {
        return config;
    };

    let key = shorten_field_name(field.name());

    if !field.is_reference() {
        if !config.contains_key(key) {
            config.insert(key, resolve_simple(field, field.storage()));
        }
        return config;
    }

    let processed: HashSet<String> = match config.get(key) {
        None => HashSet::new(),
        Some(ConfigNode::Bundles(bundles)) => bundles.keys().cloned().collect(),
        Some(_) => {
            tracing::debug!(
                key,
                "Config key already holds a non-reference value, skipping reference field"
            );
            return config;
        }
    };

    let mut extracted = Vec::new();
    for target in field.referenced_entities() {
        if processed.contains(target.bundle()) {
            continue;
        }

        let mut nested = ConfigTree::new();
        if target.is_fieldable() {
            for sub_field in target.fields() {
                extract_field_value(sub_field, &mut nested, mapping);
            }
        }
        extracted.push((target.bundle().to_string(), nested));
    }

    if extracted.is_empty() {
        return config;
    }

    if let Some(bundles) = config.bundles_entry(key) {
        for (bundle, nested) in extracted {
            bundles.entry(bundle).or_default().push(nested);
        }
    }
    config
}

fn extract_field_value(field: &dyn FieldHandle, config: &mut ConfigTree, mapping: &MappingTable) {
    let storage = field.storage();
    if storage.base_field {
        return;
    }

    let value = if field.is_reference() {
        resolve_reference(field, storage, mapping)
    } else {
        resolve_simple(field, storage)
    };
    config.insert(shorten_field_name(field.name()), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::FieldStorage;
    use crate::memory::{MemoryEntity, MemoryField};
    use modifiers_types::Scalar;

    #[test]
    fn test_missing_field_is_noop() {
        let entity = MemoryEntity::new("paragraph", "hero");
        let config = ConfigTree::new().with("keep", Scalar::from("me"));
        let out = EntityConfigExtractor::new().extract_entity(&entity, "field_nope", config.clone());
        assert_eq!(out, config);
    }

    #[test]
    fn test_non_fieldable_entity_is_noop() {
        let entity = MemoryEntity::non_fieldable("block_config", "hero");
        let out = EntityConfigExtractor::new().extract_entity(&entity, "field_a", ConfigTree::new());
        assert!(out.is_empty());
    }

    #[test]
    fn test_scalar_not_overwritten() {
        let entity = MemoryEntity::new("paragraph", "hero")
            .with_field(MemoryField::text("field_mod_padding", "2rem"));
        let config = ConfigTree::new().with("padding", Scalar::from("1rem"));
        let out = EntityConfigExtractor::new().extract_entity(&entity, "field_mod_padding", config);
        assert_eq!(out.text("padding").as_deref(), Some("1rem"));
    }

    #[test]
    fn test_empty_scalar_field_stored_as_null() {
        let entity = MemoryEntity::new("paragraph", "hero").with_field(MemoryField::new(
            "field_mod_padding",
            FieldStorage::new("string", "value"),
        ));
        let out =
            EntityConfigExtractor::new().extract_entity(&entity, "field_mod_padding", ConfigTree::new());
        assert_eq!(out.get("padding"), Some(&ConfigNode::Null));
    }

    #[test]
    fn test_extract_field_skips_base_fields() {
        let field = MemoryField::text("uuid", "abc").base_field();
        let mut config = ConfigTree::new();
        EntityConfigExtractor::new().extract_field(&field, &mut config);
        assert!(config.is_empty());
    }

    #[test]
    fn test_extract_field_overwrites() {
        let field = MemoryField::text("field_mod_media", "all");
        let mut config = ConfigTree::new().with("media", Scalar::from("print"));
        EntityConfigExtractor::new().extract_field(&field, &mut config);
        assert_eq!(config.text("media").as_deref(), Some("all"));
    }

    #[test]
    fn test_reference_into_scalar_slot_is_skipped() {
        let entity = MemoryEntity::new("paragraph", "hero").with_field(MemoryField::reference(
            "field_modifiers",
            vec![MemoryEntity::new("paragraph", "bg_color")],
        ));
        let config = ConfigTree::new().with("modifiers", Scalar::from("taken"));
        let out =
            EntityConfigExtractor::new().extract_entity(&entity, "field_modifiers", config.clone());
        assert_eq!(out, config);
    }

    #[test]
    fn test_empty_reference_adds_nothing() {
        let entity = MemoryEntity::new("paragraph", "hero")
            .with_field(MemoryField::reference("field_modifiers", Vec::new()));
        let out =
            EntityConfigExtractor::new().extract_entity(&entity, "field_modifiers", ConfigTree::new());
        assert!(out.get("modifiers").is_none());
    }
}
