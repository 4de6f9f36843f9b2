/*
 * record.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Modification records produced by modifier plugins.
 */

use crate::scalar::Scalar;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Media key for rules that apply unconditionally (no `@media` wrapper).
pub const ALL_MEDIA: &str = "all";

/// CSS fragments: media -> selector -> `property:value` declarations.
pub type CssMap = IndexMap<String, IndexMap<String, Vec<String>>>;

/// Attribute deltas: media -> selector -> attribute name -> value.
pub type AttributeMap = IndexMap<String, IndexMap<String, IndexMap<String, AttrValue>>>;

/// Attributes of one `<link>` head tag (`rel`, `href`, `as`, ...).
pub type LinkTag = IndexMap<String, String>;

/// An attribute value: either a single scalar or a list (e.g. `class`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    List(Vec<Scalar>),
    Scalar(Scalar),
}

impl From<Scalar> for AttrValue {
    fn from(value: Scalar) -> Self {
        AttrValue::Scalar(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Scalar(Scalar::from(value))
    }
}

impl From<Vec<Scalar>> for AttrValue {
    fn from(value: Vec<Scalar>) -> Self {
        AttrValue::List(value)
    }
}

/// A client-side library reference, e.g. `modifiers/parallax`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryRef(String);

impl LibraryRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LibraryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The output of one plugin invocation for one config entry.
///
/// Records are built with the consuming `with_*` methods and are not
/// mutated after a plugin hands them back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModificationRecord {
    pub css: CssMap,
    pub libraries: Vec<LibraryRef>,
    pub settings: Option<serde_json::Value>,
    pub attributes: AttributeMap,
    pub links: Vec<LinkTag>,
}

impl ModificationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one `property:value` declaration for `selector` under `media`.
    pub fn with_css(
        mut self,
        media: impl Into<String>,
        selector: impl Into<String>,
        declaration: impl Into<String>,
    ) -> Self {
        self.css
            .entry(media.into())
            .or_default()
            .entry(selector.into())
            .or_default()
            .push(declaration.into());
        self
    }

    pub fn with_library(mut self, library: LibraryRef) -> Self {
        self.libraries.push(library);
        self
    }

    pub fn with_settings(mut self, settings: serde_json::Value) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set an attribute for `selector` under `media`, replacing any earlier
    /// value for the same key within this record.
    pub fn with_attribute(
        mut self,
        media: impl Into<String>,
        selector: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Self {
        self.attributes
            .entry(media.into())
            .or_default()
            .entry(selector.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    pub fn with_link(mut self, link: LinkTag) -> Self {
        self.links.push(link);
        self
    }

    /// Check whether the record contributes nothing to the render output.
    pub fn is_empty(&self) -> bool {
        self.css.is_empty()
            && self.libraries.is_empty()
            && self.settings.is_none()
            && self.attributes.is_empty()
            && self.links.is_empty()
    }
}
