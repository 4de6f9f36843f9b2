/*
 * memory.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * In-memory entity graph.
 */

//! In-memory implementation of the entity traits.
//!
//! Useful for callers that assemble configuration without a storage
//! backend (previews, tests, static fixtures). Entities own the entities
//! their reference fields point at, so a graph is a plain tree.

use modifiers_types::Scalar;

use crate::entity::{EntityHandle, FieldHandle, FieldItem, FieldStorage};

/// A field held in memory.
#[derive(Debug, Clone)]
pub struct MemoryField {
    name: String,
    storage: FieldStorage,
    items: Vec<FieldItem>,
    reference: bool,
    targets: Vec<MemoryEntity>,
}

impl MemoryField {
    /// Create an empty non-reference field.
    pub fn new(name: impl Into<String>, storage: FieldStorage) -> Self {
        Self {
            name: name.into(),
            storage,
            items: Vec::new(),
            reference: false,
            targets: Vec::new(),
        }
    }

    /// A single-valued string field with one `value` item.
    pub fn text(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::new(name, FieldStorage::new("string", "value"))
            .with_item(FieldItem::new().with("value", value))
    }

    /// A single-valued color field with one `color`/`opacity` item.
    pub fn color(name: impl Into<String>, color: &str, opacity: impl Into<Scalar>) -> Self {
        Self::new(name, FieldStorage::new("color", "color"))
            .with_item(FieldItem::new().with("color", color).with("opacity", opacity))
    }

    /// An entity reference field pointing at `targets`.
    pub fn reference(name: impl Into<String>, targets: Vec<MemoryEntity>) -> Self {
        Self::new(name, FieldStorage::new("entity_reference", "target_id"))
            .with_references(targets)
    }

    /// An image field pointing at file entities.
    pub fn image(name: impl Into<String>, files: Vec<MemoryEntity>) -> Self {
        Self::new(name, FieldStorage::new("image", "target_id")).with_references(files)
    }

    /// A file field pointing at file entities.
    pub fn file(name: impl Into<String>, files: Vec<MemoryEntity>) -> Self {
        Self::new(name, FieldStorage::new("file", "target_id")).with_references(files)
    }

    pub fn with_item(mut self, item: FieldItem) -> Self {
        self.items.push(item);
        self
    }

    /// Turn this into a reference field and append targets.
    ///
    /// Each target also gets a `target_id` item so the field is non-empty.
    pub fn with_references(mut self, targets: Vec<MemoryEntity>) -> Self {
        self.reference = true;
        for target in targets {
            self.items.push(FieldItem::new().with("target_id", target.id));
            self.targets.push(target);
        }
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.storage.multiple = multiple;
        self
    }

    pub fn base_field(mut self) -> Self {
        self.storage.base_field = true;
        self
    }
}

impl FieldHandle for MemoryField {
    fn name(&self) -> &str {
        &self.name
    }

    fn storage(&self) -> &FieldStorage {
        &self.storage
    }

    fn items(&self) -> &[FieldItem] {
        &self.items
    }

    fn is_reference(&self) -> bool {
        self.reference
    }

    fn referenced_entities(&self) -> Vec<&dyn EntityHandle> {
        self.targets.iter().map(|e| e as &dyn EntityHandle).collect()
    }
}

/// An entity held in memory.
#[derive(Debug, Clone)]
pub struct MemoryEntity {
    id: i64,
    type_id: String,
    bundle: String,
    fieldable: bool,
    fields: Vec<MemoryField>,
    url: Option<String>,
}

impl MemoryEntity {
    pub fn new(type_id: impl Into<String>, bundle: impl Into<String>) -> Self {
        Self {
            id: 0,
            type_id: type_id.into(),
            bundle: bundle.into(),
            fieldable: true,
            fields: Vec::new(),
            url: None,
        }
    }

    /// A file entity with a public URL.
    pub fn file(url: impl Into<String>) -> Self {
        let mut entity = Self::new("file", "file");
        entity.url = Some(url.into());
        entity
    }

    /// An entity that cannot hold fields (config entities, for instance).
    pub fn non_fieldable(type_id: impl Into<String>, bundle: impl Into<String>) -> Self {
        let mut entity = Self::new(type_id, bundle);
        entity.fieldable = false;
        entity
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Add a field, replacing any existing field with the same name.
    pub fn with_field(mut self, field: MemoryField) -> Self {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == field.name) {
            *existing = field;
        } else {
            self.fields.push(field);
        }
        self
    }
}

impl EntityHandle for MemoryEntity {
    fn type_id(&self) -> &str {
        &self.type_id
    }

    fn bundle(&self) -> &str {
        &self.bundle
    }

    fn is_fieldable(&self) -> bool {
        self.fieldable
    }

    fn field(&self, name: &str) -> Option<&dyn FieldHandle> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f as &dyn FieldHandle)
    }

    fn fields(&self) -> Vec<&dyn FieldHandle> {
        self.fields.iter().map(|f| f as &dyn FieldHandle).collect()
    }

    fn public_url(&self) -> Option<String> {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_field_is_non_empty() {
        let field = MemoryField::reference("field_items", vec![MemoryEntity::new("node", "page")]);
        assert!(field.is_reference());
        assert!(!field.is_empty());
        assert_eq!(field.referenced_entities().len(), 1);
    }

    #[test]
    fn test_with_field_replaces_same_name() {
        let entity = MemoryEntity::new("paragraph", "hero")
            .with_field(MemoryField::text("field_title", "a"))
            .with_field(MemoryField::text("field_title", "b"));
        assert_eq!(entity.fields().len(), 1);
        let item = &entity.field("field_title").unwrap().items()[0];
        assert_eq!(item.get("value"), Some(&Scalar::from("b")));
    }

    #[test]
    fn test_file_entity_has_url() {
        let file = MemoryEntity::file("/files/a.jpg");
        assert_eq!(file.public_url().as_deref(), Some("/files/a.jpg"));
        assert!(MemoryEntity::new("media", "image").public_url().is_none());
    }
}
