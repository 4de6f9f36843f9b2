/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Value types for presentation modifiers.
 *
 * This crate provides pure data type definitions shared by the
 * entity-to-config extractor and the modification aggregator. It has
 * minimal dependencies (serde, serde_json, indexmap) and can be used by
 * any crate that produces or consumes modification records.
 */

pub mod config;
pub mod record;
pub mod scalar;

// Re-export commonly used types at the crate root
pub use config::{BundleMap, ConfigNode, ConfigTree, ResolvedValue};
pub use record::{
    ALL_MEDIA, AttrValue, AttributeMap, CssMap, LibraryRef, LinkTag, ModificationRecord,
};
pub use scalar::Scalar;
