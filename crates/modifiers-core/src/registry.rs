/*
 * registry.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Registry of modifier plugin factories.
 */

//! Registry of modifier plugin factories.
//!
//! The registry maps plugin type names to factories. Dispatch creates one
//! plugin instance per type and render target, so plugins may keep
//! per-target state without synchronization.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::modifier::Modifier;
use crate::plugins;

/// Creates a fresh plugin instance.
pub type ModifierFactory = Arc<dyn Fn() -> Box<dyn Modifier> + Send + Sync>;

/// Registry of available modifier plugins.
///
/// Designed to be built once and shared behind an `Arc`.
#[derive(Clone)]
pub struct ModifierRegistry {
    factories: IndexMap<String, ModifierFactory>,
}

impl ModifierRegistry {
    /// Create a registry with the built-in plugins registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        plugins::register_builtins(&mut registry);
        registry
    }

    /// Create an empty registry (for testing).
    pub fn empty() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// Register a factory under `name`.
    ///
    /// If a factory with the same name already exists, it is replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Modifier> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Instantiate the plugin registered under `name`.
    ///
    /// Returns `None` if no plugin with the given name is registered.
    pub fn create(&self, name: &str) -> Option<Box<dyn Modifier>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Check if a plugin type is registered.
    pub fn has_modifier(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// List registered type names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for ModifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ModifierRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModifierRegistry")
            .field("modifiers", &self.names())
            .finish()
    }
}
