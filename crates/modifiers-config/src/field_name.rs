/*
 * field_name.rs
 * Copyright (c) 2025 Posit, PBC
 */

/// Strip the storage prefix from a field name to get its config key.
///
/// `field_mod_` is checked before `field_` so that modifier fields lose the
/// whole prefix. Names without either prefix are returned unchanged.
pub fn shorten_field_name(name: &str) -> &str {
    name.strip_prefix("field_mod_")
        .or_else(|| name.strip_prefix("field_"))
        .unwrap_or(name)
}
