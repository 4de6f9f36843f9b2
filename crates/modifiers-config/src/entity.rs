/*
 * entity.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Interface to the content entity collaborator.
 */

//! Interface to the content entity collaborator.
//!
//! Storage, loading, and field typing of content entities live outside this
//! crate. Extraction only needs to read fields, follow references, and ask
//! a file entity for its public URL, which is what these traits expose.

use indexmap::IndexMap;
use modifiers_types::Scalar;
use serde::{Deserialize, Serialize};

/// Storage descriptor for one field, supplied by the entity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStorage {
    /// Field type id, e.g. `"string"`, `"color"`, `"image"`, `"entity_reference"`
    pub field_type: String,

    /// Name of the item property holding the field's primary value
    pub main_property: String,

    /// Whether the field accepts more than one item
    pub multiple: bool,

    /// Base (system) fields such as `id` or `uuid` are never extracted
    pub base_field: bool,
}

impl FieldStorage {
    pub fn new(field_type: impl Into<String>, main_property: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            main_property: main_property.into(),
            multiple: false,
            base_field: false,
        }
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn base_field(mut self, base_field: bool) -> Self {
        self.base_field = base_field;
        self
    }

    pub fn is_color(&self) -> bool {
        self.field_type == "color"
    }

    pub fn is_file(&self) -> bool {
        self.field_type == "file" || self.field_type == "image"
    }
}

/// One value item of a field: a map of property name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldItem {
    properties: IndexMap<String, Scalar>,
}

impl FieldItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.properties.insert(property.into(), value.into());
        self
    }

    pub fn get(&self, property: &str) -> Option<&Scalar> {
        self.properties.get(property)
    }
}

/// Read access to one field's values on one entity.
pub trait FieldHandle {
    /// Machine name of the field, e.g. `field_mod_bg_color`.
    fn name(&self) -> &str;

    fn storage(&self) -> &FieldStorage;

    fn items(&self) -> &[FieldItem];

    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Whether this field points at other entities.
    fn is_reference(&self) -> bool;

    /// The entities this field points at, in item order.
    ///
    /// Empty for non-reference fields and for dangling references.
    fn referenced_entities(&self) -> Vec<&dyn EntityHandle>;
}

/// Read access to one content entity.
pub trait EntityHandle {
    /// Entity type id, e.g. `"paragraph"`, `"media"`, `"file"`.
    fn type_id(&self) -> &str;

    /// Bundle (sub-type) of the entity, e.g. `"image"` for an image media.
    fn bundle(&self) -> &str;

    /// Whether the entity can hold fields at all.
    fn is_fieldable(&self) -> bool {
        true
    }

    fn field(&self, name: &str) -> Option<&dyn FieldHandle>;

    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// All fields the entity declares, in declaration order.
    fn fields(&self) -> Vec<&dyn FieldHandle>;

    /// Public URL of a file entity. `None` for anything that is not a file.
    fn public_url(&self) -> Option<String> {
        None
    }
}
