/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pipeline options.
 */

//! Pipeline options, loadable from YAML.
//!
//! ```yaml
//! modifiers_field: field_modifiers
//! selector_prefix: "#"
//! mapping:
//!   media:
//!     slideshow: [field_media_slides]
//! ```
//!
//! Every key is optional.

use modifiers_config::MappingTable;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_MODIFIERS_FIELD: &str = "field_modifiers";
pub const DEFAULT_SELECTOR_PREFIX: &str = "#";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifiersOptions {
    /// Field on the render target that references its modifier entities.
    pub modifiers_field: String,
    /// Prepended to the build id to form the target's CSS selector.
    pub selector_prefix: String,
    /// Mapping overrides, applied on top of the default table.
    pub mapping: MappingTable,
}

impl Default for ModifiersOptions {
    fn default() -> Self {
        Self {
            modifiers_field: DEFAULT_MODIFIERS_FIELD.to_string(),
            selector_prefix: DEFAULT_SELECTOR_PREFIX.to_string(),
            mapping: MappingTable::new(),
        }
    }
}

impl ModifiersOptions {
    /// Parse options from YAML. Blank input yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: ModifiersOptions = serde_yaml::from_str(yaml)?;
        options.mapping.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModifierError;

    #[test]
    fn test_defaults() {
        let options = ModifiersOptions::from_yaml_str("").unwrap();
        assert_eq!(options.modifiers_field, "field_modifiers");
        assert_eq!(options.selector_prefix, "#");
        assert!(options.mapping.is_empty());
    }

    #[test]
    fn test_partial_yaml() {
        let options = ModifiersOptions::from_yaml_str(
            r#"
selector_prefix: ".mod-"
mapping:
  media:
    slideshow: [field_media_slides, field_media_image]
"#,
        )
        .unwrap();
        assert_eq!(options.modifiers_field, "field_modifiers");
        assert_eq!(options.selector_prefix, ".mod-");
        assert_eq!(
            options.mapping.candidates("media", "slideshow"),
            Some(&["field_media_slides".to_string(), "field_media_image".to_string()][..])
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ModifiersOptions::from_yaml_str("modifiers_field: [").unwrap_err();
        assert!(matches!(err, ModifierError::Options(_)));
    }

    #[test]
    fn test_empty_candidates_rejected() {
        let err = ModifiersOptions::from_yaml_str("mapping:\n  media:\n    image: []\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field mapping for 'media.image' has no candidate fields"
        );
    }
}
