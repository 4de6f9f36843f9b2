//! Flattened plugin configuration extracted from content entity graphs.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Content entities (paragraphs, media, blocks) store presentation settings
//! in typed fields. Modifier plugins want none of that: they consume a flat
//! map of short keys to plain values. This crate bridges the two.
//!
//! # Key Features
//!
//! - **Short keys**: `field_mod_bg_color` is exposed as `bg_color`
//! - **Color fields**: hex + opacity pairs become `rgba(...)` strings
//! - **Reference bridging**: a media reference resolves to the file URL of
//!   its source field via a [`MappingTable`]
//! - **Idempotent merges**: bundles already present in an incoming config
//!   are never extracted twice
//!
//! # Example
//!
//! ```rust
//! use modifiers_config::{EntityConfigExtractor, MemoryEntity, MemoryField};
//! use modifiers_types::ConfigTree;
//!
//! let entity = MemoryEntity::new("paragraph", "hero")
//!     .with_field(MemoryField::text("field_mod_padding", "2rem"));
//!
//! let extractor = EntityConfigExtractor::new();
//! let config = extractor.extract_entity(&entity, "field_mod_padding", ConfigTree::new());
//! assert_eq!(config.text("padding").as_deref(), Some("2rem"));
//! ```

mod color;
mod entity;
mod error;
mod extract;
mod field_name;
mod mapping;
mod memory;
mod resolve;

pub use color::hex_to_rgba;
pub use entity::{EntityHandle, FieldHandle, FieldItem, FieldStorage};
pub use error::{ConfigError, Result};
pub use extract::EntityConfigExtractor;
pub use field_name::shorten_field_name;
pub use mapping::{MappingAlter, MappingTable};
pub use memory::{MemoryEntity, MemoryField};
pub use resolve::{resolve_reference, resolve_simple};
