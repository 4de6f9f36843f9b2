/*
 * plugins/parallax.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Parallax scrolling modifier.
 */

//! Parallax scrolling modifier.
//!
//! The effect runs client-side: the plugin loads the `modifiers/parallax`
//! library, publishes `{selector, speed}` as a settings payload for the
//! script to pick up, and marks the target with `data-parallax="true"`.

use modifiers_types::{ConfigTree, LibraryRef, ModificationRecord};
use serde_json::json;

use super::media;
use crate::modifier::Modifier;

pub const PARALLAX_LIBRARY: &str = "modifiers/parallax";

#[derive(Debug, Clone, Default)]
pub struct ParallaxModifier;

impl ParallaxModifier {
    pub fn new() -> Self {
        Self
    }
}

impl Modifier for ParallaxModifier {
    fn name(&self) -> &str {
        "parallax"
    }

    fn modification(&self, selector: &str, config: &ConfigTree) -> Option<ModificationRecord> {
        let speed = config
            .get("speed")
            .and_then(|node| node.as_scalar())
            .filter(|speed| !speed.is_blank())?;

        Some(
            ModificationRecord::new()
                .with_library(LibraryRef::new(PARALLAX_LIBRARY))
                .with_settings(json!({ "selector": selector, "speed": speed }))
                .with_attribute(media(config), selector, "data-parallax", "true"),
        )
    }
}
