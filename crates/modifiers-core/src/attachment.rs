/*
 * attachment.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render attachments produced by aggregation.
 */

//! Render attachments and the sink that receives them.
//!
//! The aggregator does not know how the host assembles a page. It emits
//! [`Attachment`] records to an [`AttachmentSink`]:
//! - a style tag with the serialized CSS
//! - client-side library references
//! - settings payloads, bucketed per build id under the `modifiers`
//!   namespace (`modifiers.settings.<id>` and `modifiers.attributes.<id>`)
//! - head links, keyed by content hash
//!
//! [`AttachmentStore`] is the in-memory sink.

use indexmap::IndexMap;
use modifiers_types::{LibraryRef, LinkTag};
use serde_json::{Map, Value};

/// Namespace for settings buckets in the client-side settings object.
pub const SETTINGS_NAMESPACE: &str = "modifiers";

/// Which settings bucket a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsKind {
    /// Per-plugin settings, collected as a list.
    Settings,
    /// The merged attribute tree.
    Attributes,
}

impl SettingsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsKind::Settings => "settings",
            SettingsKind::Attributes => "attributes",
        }
    }
}

/// One item handed to the page assembler.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    /// Inline `<style>` content.
    Style { key: String, css: String },
    /// A client-side library to load.
    Library(LibraryRef),
    /// A settings bucket for one build id.
    Settings {
        kind: SettingsKind,
        build_id: String,
        value: Value,
    },
    /// A `<link>` tag for the document head.
    HeadLink { key: String, link: LinkTag },
}

impl Attachment {
    /// Dotted path of a settings bucket, e.g. `modifiers.settings.hero`.
    /// `None` for non-settings attachments.
    pub fn settings_path(&self) -> Option<String> {
        match self {
            Attachment::Settings { kind, build_id, .. } => Some(format!(
                "{}.{}.{}",
                SETTINGS_NAMESPACE,
                kind.as_str(),
                build_id
            )),
            _ => None,
        }
    }
}

/// Receiver of render attachments.
pub trait AttachmentSink {
    fn attach(&mut self, attachment: Attachment);
}

impl AttachmentSink for Vec<Attachment> {
    fn attach(&mut self, attachment: Attachment) {
        self.push(attachment);
    }
}

/// In-memory attachment sink.
///
/// Styles and head links are keyed: attaching the same key twice replaces
/// the earlier entry in place. Libraries are deduplicated, since a page
/// loads each library once. Settings buckets are keyed by kind and build
/// id; a later bucket for the same pair replaces the earlier one.
#[derive(Debug, Default)]
pub struct AttachmentStore {
    styles: IndexMap<String, String>,
    libraries: Vec<LibraryRef>,
    settings: IndexMap<(SettingsKind, String), Value>,
    head_links: IndexMap<String, LinkTag>,
}

impl AttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a style by key
    pub fn style(&self, key: &str) -> Option<&str> {
        self.styles.get(key).map(String::as_str)
    }

    /// Iterate styles in attach order
    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn libraries(&self) -> &[LibraryRef] {
        &self.libraries
    }

    pub fn settings(&self, kind: SettingsKind, build_id: &str) -> Option<&Value> {
        self.settings.get(&(kind, build_id.to_string()))
    }

    pub fn head_link(&self, key: &str) -> Option<&LinkTag> {
        self.head_links.get(key)
    }

    pub fn head_links(&self) -> impl Iterator<Item = (&str, &LinkTag)> {
        self.head_links.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build the client-side settings object:
    /// `{"modifiers": {"settings": {id: [...]}, "attributes": {id: {...}}}}`.
    pub fn settings_json(&self) -> Value {
        let mut buckets = Map::new();
        for ((kind, build_id), value) in &self.settings {
            let bucket = buckets
                .entry(kind.as_str())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(ids) = bucket {
                ids.insert(build_id.clone(), value.clone());
            }
        }

        let mut root = Map::new();
        root.insert(SETTINGS_NAMESPACE.to_string(), Value::Object(buckets));
        Value::Object(root)
    }

    /// Total number of stored attachments
    pub fn len(&self) -> usize {
        self.styles.len() + self.libraries.len() + self.settings.len() + self.head_links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AttachmentSink for AttachmentStore {
    fn attach(&mut self, attachment: Attachment) {
        match attachment {
            Attachment::Style { key, css } => {
                self.styles.insert(key, css);
            }
            Attachment::Library(library) => {
                if !self.libraries.contains(&library) {
                    self.libraries.push(library);
                }
            }
            Attachment::Settings {
                kind,
                build_id,
                value,
            } => {
                self.settings.insert((kind, build_id), value);
            }
            Attachment::HeadLink { key, link } => {
                self.head_links.insert(key, link);
            }
        }
    }
}
