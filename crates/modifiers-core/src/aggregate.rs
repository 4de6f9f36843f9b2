/*
 * aggregate.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Merges modification records for one render target.
 */

//! Aggregation of modification records.
//!
//! Records are folded strictly in submission order. CSS is serialized per
//! record and concatenated, libraries and links are appended as-is,
//! settings payloads are collected without merging, and attribute trees
//! are deep-merged (see [`merge_attributes`]).

use modifiers_types::{AttributeMap, LibraryRef, LinkTag, ModificationRecord};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::attachment::{Attachment, AttachmentSink, SettingsKind};
use crate::attributes::merge_attributes;
use crate::css::serialize_css;
use crate::error::Result;

/// Merged output for one render target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationResult {
    pub build_id: String,
    pub css: String,
    /// Submission order, duplicates preserved.
    pub libraries: Vec<LibraryRef>,
    pub settings: Vec<Value>,
    pub attributes: AttributeMap,
    pub head_links: Vec<LinkTag>,
}

impl AggregationResult {
    pub fn new(build_id: impl Into<String>) -> Self {
        Self {
            build_id: build_id.into(),
            ..Default::default()
        }
    }

    /// Key of the style attachment for this build.
    pub fn style_key(&self) -> String {
        format!("modifiers_css_{}", self.build_id)
    }

    pub fn is_empty(&self) -> bool {
        self.css.is_empty()
            && self.libraries.is_empty()
            && self.settings.is_empty()
            && self.attributes.is_empty()
            && self.head_links.is_empty()
    }

    /// Convert the result into sink records.
    ///
    /// Empty parts produce no attachment. Head links are keyed by
    /// [`link_key`], so identical links collapse in a keyed sink.
    pub fn attachments(&self) -> Result<Vec<Attachment>> {
        let mut out = Vec::new();

        if !self.css.is_empty() {
            out.push(Attachment::Style {
                key: self.style_key(),
                css: self.css.clone(),
            });
        }

        out.extend(self.libraries.iter().cloned().map(Attachment::Library));

        if !self.settings.is_empty() {
            out.push(Attachment::Settings {
                kind: SettingsKind::Settings,
                build_id: self.build_id.clone(),
                value: Value::Array(self.settings.clone()),
            });
        }

        if !self.attributes.is_empty() {
            out.push(Attachment::Settings {
                kind: SettingsKind::Attributes,
                build_id: self.build_id.clone(),
                value: serde_json::to_value(&self.attributes)?,
            });
        }

        for link in &self.head_links {
            out.push(Attachment::HeadLink {
                key: link_key(link)?,
                link: link.clone(),
            });
        }

        Ok(out)
    }

    /// Push every attachment into `sink`.
    pub fn attach_to(&self, sink: &mut dyn AttachmentSink) -> Result<()> {
        for attachment in self.attachments()? {
            sink.attach(attachment);
        }
        Ok(())
    }
}

/// Fold `modifications` into one result for `build_id`.
pub fn aggregate(modifications: &[ModificationRecord], build_id: &str) -> AggregationResult {
    let mut result = AggregationResult::new(build_id);

    for record in modifications {
        result.css.push_str(&serialize_css(&record.css));
        result.libraries.extend(record.libraries.iter().cloned());
        if let Some(settings) = record.settings.as_ref().filter(|s| !s.is_null()) {
            result.settings.push(settings.clone());
        }
        merge_attributes(&mut result.attributes, &record.attributes);
        result.head_links.extend(record.links.iter().cloned());
    }

    tracing::debug!(
        build_id = build_id,
        records = modifications.len(),
        css_bytes = result.css.len(),
        libraries = result.libraries.len(),
        settings = result.settings.len(),
        head_links = result.head_links.len(),
        "Aggregated modifications"
    );

    result
}

/// Content key for a head link: SHA-256 hex of its JSON serialization.
pub fn link_key(link: &LinkTag) -> Result<String> {
    let bytes = serde_json::to_vec(link)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}
