/*
 * modifier.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Modifier plugin trait.
 */

//! The modifier plugin contract.
//!
//! # Example
//!
//! ```
//! use modifiers_core::{Modifier, ModificationRecord};
//! use modifiers_types::{ALL_MEDIA, ConfigTree};
//!
//! struct Opacity;
//!
//! impl Modifier for Opacity {
//!     fn name(&self) -> &str { "opacity" }
//!
//!     fn modification(&self, selector: &str, config: &ConfigTree) -> Option<ModificationRecord> {
//!         let value = config.text("opacity")?;
//!         Some(ModificationRecord::new().with_css(ALL_MEDIA, selector, format!("opacity:{value}")))
//!     }
//! }
//!
//! let config = ConfigTree::new().with("opacity", "0.5");
//! let record = Opacity.modification("#hero", &config).unwrap();
//! assert_eq!(record.css["all"]["#hero"], vec!["opacity:0.5"]);
//! ```

use modifiers_types::{ConfigTree, ModificationRecord};

/// A modifier plugin.
///
/// One instance handles every config entry of its type for one render
/// target. Implementations must be `Send + Sync` so factories can live in
/// a shared registry.
pub trait Modifier: Send + Sync {
    /// Type name the plugin is registered under (e.g. `bg_color`).
    fn name(&self) -> &str;

    /// Produce the modification for one config entry.
    ///
    /// `selector` addresses the render target. Return `None` when the
    /// config does not carry what the plugin needs.
    fn modification(&self, selector: &str, config: &ConfigTree) -> Option<ModificationRecord>;
}
