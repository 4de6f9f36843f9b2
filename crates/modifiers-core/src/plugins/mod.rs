/*
 * plugins/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Built-in modifier plugins.
 */

//! Built-in modifier plugins.
//!
//! - [`CssPropertyModifier`] - One CSS declaration from one config key
//!   (`bg_color`, `font_color`, `padding`)
//! - [`BackgroundImageModifier`] - Background image with a preload link
//! - [`CssClassModifier`] - Adds classes to the render target
//! - [`ParallaxModifier`] - Client-side parallax scrolling
//!
//! Every plugin reads an optional `media` key (default `all`) that selects
//! the media block its output lands in.

mod bg_image;
mod css_class;
mod css_property;
mod parallax;

pub use bg_image::BackgroundImageModifier;
pub use css_class::CssClassModifier;
pub use css_property::CssPropertyModifier;
pub use parallax::ParallaxModifier;

use modifiers_types::{ALL_MEDIA, ConfigTree};

use crate::registry::ModifierRegistry;

/// Register every built-in plugin.
pub fn register_builtins(registry: &mut ModifierRegistry) {
    registry.register("bg_color", || Box::new(CssPropertyModifier::bg_color()));
    registry.register("font_color", || Box::new(CssPropertyModifier::font_color()));
    registry.register("padding", || Box::new(CssPropertyModifier::padding()));
    registry.register("bg_image", || Box::new(BackgroundImageModifier::new()));
    registry.register("css_class", || Box::new(CssClassModifier::new()));
    registry.register("parallax", || Box::new(ParallaxModifier::new()));
}

/// Media block for a plugin's output.
pub(crate) fn media(config: &ConfigTree) -> String {
    config
        .text("media")
        .unwrap_or_else(|| ALL_MEDIA.to_string())
}
