/*
 * plugins/bg_image.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Background image modifier.
 */

//! Background image modifier.
//!
//! Reads the resolved image URL from `image` plus optional `size` and
//! `position`, and emits the matching `background-*` declarations. The
//! image is also announced as a `<link rel="preload" as="image">` head
//! link so the browser fetches it before the stylesheet is applied.

use modifiers_types::{ConfigTree, LinkTag, ModificationRecord};

use super::media;
use crate::modifier::Modifier;

#[derive(Debug, Clone, Default)]
pub struct BackgroundImageModifier;

impl BackgroundImageModifier {
    pub fn new() -> Self {
        Self
    }
}

impl Modifier for BackgroundImageModifier {
    fn name(&self) -> &str {
        "bg_image"
    }

    fn modification(&self, selector: &str, config: &ConfigTree) -> Option<ModificationRecord> {
        let url = config.text("image")?;
        let media = media(config);

        let mut record = ModificationRecord::new().with_css(
            media.as_str(),
            selector,
            format!("background-image:url(\"{}\")", url),
        );
        if let Some(size) = config.text("size") {
            record = record.with_css(media.as_str(), selector, format!("background-size:{}", size));
        }
        if let Some(position) = config.text("position") {
            record = record.with_css(
                media.as_str(),
                selector,
                format!("background-position:{}", position),
            );
        }

        let link = LinkTag::from([
            ("rel".to_string(), "preload".to_string()),
            ("as".to_string(), "image".to_string()),
            ("href".to_string(), url),
        ]);
        Some(record.with_link(link))
    }
}
