/*
 * mapping.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Field mapping table for reference bridging.
 */

//! Field mapping table for reference bridging.
//!
//! When a modifier field references a media entity, the value a plugin
//! wants is not the media entity itself but the content of its source
//! field (the image file, the video URL). The mapping table names, per
//! entity type and bundle, the candidate fields that hold that content.
//!
//! ```yaml
//! media:
//!   image: [field_media_image]
//!   remote_video: [field_media_oembed_video]
//! ```
//!
//! Candidates are tried in order; the first one present and non-empty on
//! the referenced entity wins.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Hook for adjusting the mapping table before extraction.
///
/// Alterations run once per top-level extraction call, in registration
/// order, on a fresh copy of the default table.
pub trait MappingAlter: Send + Sync {
    fn alter(&self, table: &mut MappingTable);
}

/// `type_id -> bundle -> ordered candidate field names`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable {
    types: IndexMap<String, IndexMap<String, Vec<String>>>,
}

impl MappingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table covering the core media types.
    pub fn defaults() -> Self {
        Self::new()
            .with("media", "image", &["field_media_image"])
            .with("media", "audio", &["field_media_audio_file"])
            .with("media", "video", &["field_media_video_file"])
            .with("media", "remote_video", &["field_media_oembed_video"])
            .with("media", "document", &["field_media_document", "field_media_file"])
    }

    /// Build the effective table: defaults, then each alteration in order.
    pub fn assemble<'a, A>(alterations: impl IntoIterator<Item = &'a A>) -> Self
    where
        A: MappingAlter + ?Sized + 'a,
    {
        let mut table = Self::defaults();
        for alteration in alterations {
            alteration.alter(&mut table);
        }
        table
    }

    /// Parse an override table from YAML.
    ///
    /// Every bundle must list at least one candidate field.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let table: MappingTable = serde_yaml::from_str(yaml)?;
        table.validate()?;
        Ok(table)
    }

    /// Check that every bundle lists at least one candidate.
    pub fn validate(&self) -> Result<()> {
        for (type_id, bundles) in &self.types {
            for (bundle, candidates) in bundles {
                if candidates.is_empty() {
                    return Err(ConfigError::EmptyCandidates {
                        type_id: type_id.clone(),
                        bundle: bundle.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Builder-style [`MappingTable::set`].
    pub fn with(mut self, type_id: &str, bundle: &str, candidates: &[&str]) -> Self {
        self.set(type_id, bundle, candidates.iter().map(|c| (*c).to_string()).collect());
        self
    }

    /// Replace the candidate list for one `type_id` / `bundle` pair.
    pub fn set(&mut self, type_id: &str, bundle: &str, candidates: Vec<String>) {
        self.types
            .entry(type_id.to_string())
            .or_default()
            .insert(bundle.to_string(), candidates);
    }

    /// Remove the entry for one `type_id` / `bundle` pair.
    pub fn remove(&mut self, type_id: &str, bundle: &str) -> Option<Vec<String>> {
        self.types.get_mut(type_id)?.shift_remove(bundle)
    }

    /// Candidate field names for an entity type and bundle.
    pub fn candidates(&self, type_id: &str, bundle: &str) -> Option<&[String]> {
        self.types
            .get(type_id)?
            .get(bundle)
            .map(|c| c.as_slice())
    }

    /// Overlay `other` on top of this table.
    ///
    /// Each `type_id` / `bundle` entry in `other` replaces the matching entry
    /// here wholesale; candidate lists are not merged.
    pub fn apply_overrides(&mut self, other: &MappingTable) {
        for (type_id, bundles) in &other.types {
            for (bundle, candidates) in bundles {
                self.set(type_id, bundle, candidates.clone());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl MappingAlter for MappingTable {
    fn alter(&self, table: &mut MappingTable) {
        table.apply_overrides(self);
    }
}
