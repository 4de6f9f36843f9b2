/*
 * pipeline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Entity to attachments, end to end.
 */

//! End-to-end modifier pipeline.
//!
//! ## Stages
//!
//! 1. **Extract**: the render target's modifiers field -> [`ConfigTree`]
//! 2. **Dispatch**: each bundle of modifier configs -> plugin records
//! 3. **Aggregate**: records -> [`AggregationResult`]
//! 4. **Attach**: result -> [`AttachmentSink`]
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use modifiers_config::{MemoryEntity, MemoryField};
//! use modifiers_core::{AttachmentStore, ModifierPipeline, ModifierRegistry, ModifiersOptions};
//!
//! let modifier = MemoryEntity::new("modifier", "bg_color")
//!     .with_field(MemoryField::color("field_mod_bg_color", "#ff0000", "0.5"));
//! let page = MemoryEntity::new("paragraph", "hero")
//!     .with_field(MemoryField::reference("field_modifiers", vec![modifier]));
//!
//! let pipeline = ModifierPipeline::new(ModifiersOptions::default(), Arc::new(ModifierRegistry::new()));
//! let mut store = AttachmentStore::new();
//! let result = pipeline.apply(&page, "hero", &mut store).unwrap();
//!
//! assert_eq!(result.css, "#hero{background-color:rgba(255,0,0,0.5)}");
//! assert_eq!(store.style("modifiers_css_hero"), Some(result.css.as_str()));
//! ```

use std::sync::Arc;

use modifiers_config::{EntityConfigExtractor, EntityHandle, MappingAlter, shorten_field_name};
use modifiers_types::{ConfigTree, ModificationRecord};

use crate::aggregate::{AggregationResult, aggregate};
use crate::attachment::AttachmentSink;
use crate::dispatch::dispatch;
use crate::error::Result;
use crate::options::ModifiersOptions;
use crate::registry::ModifierRegistry;

/// Wires extraction, dispatch, aggregation, and attachment together.
#[derive(Debug, Clone)]
pub struct ModifierPipeline {
    options: ModifiersOptions,
    registry: Arc<ModifierRegistry>,
    extractor: EntityConfigExtractor,
}

impl ModifierPipeline {
    /// Create a pipeline. Mapping overrides from `options` are registered
    /// as the first extractor alteration.
    pub fn new(options: ModifiersOptions, registry: Arc<ModifierRegistry>) -> Self {
        let mut extractor = EntityConfigExtractor::new();
        if !options.mapping.is_empty() {
            extractor.add_alteration(Arc::new(options.mapping.clone()));
        }
        Self {
            options,
            registry,
            extractor,
        }
    }

    /// Register an additional mapping alteration (builder style).
    pub fn with_alteration(mut self, alteration: Arc<dyn MappingAlter>) -> Self {
        self.extractor.add_alteration(alteration);
        self
    }

    pub fn options(&self) -> &ModifiersOptions {
        &self.options
    }

    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    /// CSS selector addressing the render target.
    pub fn selector(&self, build_id: &str) -> String {
        format!("{}{}", self.options.selector_prefix, build_id)
    }

    /// Extract the modifiers field of `entity` into a config tree.
    pub fn extract(&self, entity: &dyn EntityHandle) -> ConfigTree {
        self.extractor
            .extract_entity(entity, &self.options.modifiers_field, ConfigTree::new())
    }

    /// Extract and dispatch, returning the plugin records.
    pub fn collect(&self, entity: &dyn EntityHandle, build_id: &str) -> Vec<ModificationRecord> {
        let config = self.extract(entity);
        let key = shorten_field_name(&self.options.modifiers_field);
        let Some(modifiers) = config.bundles(key) else {
            tracing::debug!(
                entity_type = entity.type_id(),
                bundle = entity.bundle(),
                field = %self.options.modifiers_field,
                "No modifiers on render target"
            );
            return Vec::new();
        };
        dispatch(&self.registry, modifiers, &self.selector(build_id))
    }

    /// Run the full pipeline and push the attachments into `sink`.
    pub fn apply(
        &self,
        entity: &dyn EntityHandle,
        build_id: &str,
        sink: &mut dyn AttachmentSink,
    ) -> Result<AggregationResult> {
        let records = self.collect(entity, build_id);
        let result = aggregate(&records, build_id);
        result.attach_to(sink)?;
        Ok(result)
    }
}
