/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Flattened configuration trees handed to modifier plugins.
 */

use crate::scalar::Scalar;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Nested configs grouped by the bundle of the referenced entity.
///
/// Each referenced entity contributes one `ConfigTree` to the list of its
/// bundle. Keys keep insertion order.
pub type BundleMap = IndexMap<String, Vec<ConfigTree>>;

/// The value extracted from a single field.
///
/// Single-valued fields collapse to their first item; multi-valued fields
/// keep every item in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Single(Scalar),
    List(Vec<Scalar>),
}

impl ResolvedValue {
    /// Collapse a list of extracted items according to field cardinality.
    ///
    /// Returns `None` when a single-valued field produced nothing.
    pub fn collapse(items: Vec<Scalar>, multiple: bool) -> Option<Self> {
        if multiple {
            Some(ResolvedValue::List(items))
        } else {
            items.into_iter().next().map(ResolvedValue::Single)
        }
    }
}

/// One entry in a configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigNode {
    /// The field exists but holds no value.
    Null,
    Scalar(Scalar),
    List(Vec<Scalar>),
    /// A reference field: bundle name -> one config per referenced entity.
    Bundles(BundleMap),
}

impl ConfigNode {
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigNode::Null)
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ConfigNode::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            ConfigNode::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bundles(&self) -> Option<&BundleMap> {
        match self {
            ConfigNode::Bundles(bundles) => Some(bundles),
            _ => None,
        }
    }

    pub fn as_bundles_mut(&mut self) -> Option<&mut BundleMap> {
        match self {
            ConfigNode::Bundles(bundles) => Some(bundles),
            _ => None,
        }
    }
}

impl From<Option<ResolvedValue>> for ConfigNode {
    fn from(value: Option<ResolvedValue>) -> Self {
        match value {
            None => ConfigNode::Null,
            Some(ResolvedValue::Single(s)) => ConfigNode::Scalar(s),
            Some(ResolvedValue::List(items)) => ConfigNode::List(items),
        }
    }
}

impl From<Scalar> for ConfigNode {
    fn from(value: Scalar) -> Self {
        ConfigNode::Scalar(value)
    }
}

impl From<&str> for ConfigNode {
    fn from(value: &str) -> Self {
        ConfigNode::Scalar(Scalar::from(value))
    }
}

impl From<Vec<Scalar>> for ConfigNode {
    fn from(items: Vec<Scalar>) -> Self {
        ConfigNode::List(items)
    }
}

impl From<BundleMap> for ConfigNode {
    fn from(bundles: BundleMap) -> Self {
        ConfigNode::Bundles(bundles)
    }
}

/// A flat, short-keyed configuration object for one entity.
///
/// Keys are field names with their storage prefix stripped (`field_mod_color`
/// becomes `color`). Reference fields nest further trees under
/// [`ConfigNode::Bundles`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree {
    entries: IndexMap<String, ConfigNode>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigNode> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        node: impl Into<ConfigNode>,
    ) -> Option<ConfigNode> {
        self.entries.insert(key.into(), node.into())
    }

    /// Builder-style insert, convenient for constructing plugin configs.
    pub fn with(mut self, key: impl Into<String>, node: impl Into<ConfigNode>) -> Self {
        self.insert(key, node);
        self
    }

    /// Get the bundle map stored under `key`, creating an empty one if absent.
    ///
    /// Returns `None` if the key already holds a non-bundle value.
    pub fn bundles_entry(&mut self, key: &str) -> Option<&mut BundleMap> {
        self.entries
            .entry(key.to_string())
            .or_insert_with(|| ConfigNode::Bundles(BundleMap::new()))
            .as_bundles_mut()
    }

    /// Get the bundle map stored under `key`.
    pub fn bundles(&self, key: &str) -> Option<&BundleMap> {
        self.get(key).and_then(ConfigNode::as_bundles)
    }

    /// Read a scalar as text, ignoring blank strings.
    ///
    /// Lists yield their first element; bundles and nulls yield `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        let scalar = match self.get(key)? {
            ConfigNode::Scalar(s) => s,
            ConfigNode::List(items) => items.first()?,
            _ => return None,
        };
        if scalar.is_blank() {
            None
        } else {
            Some(scalar.to_string())
        }
    }

    /// Read a scalar or list as a list of scalars.
    pub fn scalars(&self, key: &str) -> Vec<Scalar> {
        match self.get(key) {
            Some(ConfigNode::Scalar(s)) => vec![s.clone()],
            Some(ConfigNode::List(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
