/*
 * dispatch.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Hands config entries to modifier plugins.
 */

use modifiers_types::{BundleMap, ModificationRecord};

use crate::registry::ModifierRegistry;

/// Run every configured plugin against `selector`.
///
/// `modifiers` maps plugin type names to their config entries, as found
/// under the modifiers field of an extracted config tree. Each registered
/// type is instantiated once and called per entry. Records come back in
/// type order, then entry order; `None` and empty records are dropped.
/// Unregistered types are skipped.
pub fn dispatch(
    registry: &ModifierRegistry,
    modifiers: &BundleMap,
    selector: &str,
) -> Vec<ModificationRecord> {
    let mut records = Vec::new();

    for (type_name, configs) in modifiers {
        if configs.is_empty() {
            continue;
        }
        let Some(modifier) = registry.create(type_name) else {
            tracing::debug!(modifier = %type_name, "Skipping unregistered modifier type");
            continue;
        };

        tracing::debug!(
            modifier = modifier.name(),
            configs = configs.len(),
            selector = selector,
            "Running modifier"
        );

        records.extend(
            configs
                .iter()
                .filter_map(|config| modifier.modification(selector, config))
                .filter(|record| !record.is_empty()),
        );
    }

    records
}
