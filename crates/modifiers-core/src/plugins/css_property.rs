/*
 * plugins/css_property.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Single-declaration CSS modifiers.
 */

use modifiers_types::{ConfigTree, ModificationRecord};

use super::media;
use crate::modifier::Modifier;

/// Writes one CSS declaration, `<property>:<value>`, where the value is
/// read from a config key.
#[derive(Debug, Clone)]
pub struct CssPropertyModifier {
    name: &'static str,
    key: &'static str,
    property: &'static str,
}

impl CssPropertyModifier {
    pub fn new(name: &'static str, key: &'static str, property: &'static str) -> Self {
        Self {
            name,
            key,
            property,
        }
    }

    /// `bg_color` -> `background-color`
    pub fn bg_color() -> Self {
        Self::new("bg_color", "bg_color", "background-color")
    }

    /// `font_color` -> `color`
    pub fn font_color() -> Self {
        Self::new("font_color", "font_color", "color")
    }

    /// `padding` -> `padding`
    pub fn padding() -> Self {
        Self::new("padding", "padding", "padding")
    }
}

impl Modifier for CssPropertyModifier {
    fn name(&self) -> &str {
        self.name
    }

    fn modification(&self, selector: &str, config: &ConfigTree) -> Option<ModificationRecord> {
        let value = config.text(self.key)?;
        Some(ModificationRecord::new().with_css(
            media(config),
            selector,
            format!("{}:{}", self.property, value),
        ))
    }
}
