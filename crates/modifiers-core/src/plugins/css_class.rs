/*
 * plugins/css_class.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Class list modifier.
 */

use modifiers_types::{ConfigTree, ModificationRecord, Scalar};

use super::media;
use crate::modifier::Modifier;

/// Adds the classes listed under `class` to the render target.
///
/// String values are split on whitespace, so both `["a", "b"]` and
/// `"a b"` produce the classes `a` and `b`.
#[derive(Debug, Clone, Default)]
pub struct CssClassModifier;

impl CssClassModifier {
    pub fn new() -> Self {
        Self
    }
}

impl Modifier for CssClassModifier {
    fn name(&self) -> &str {
        "css_class"
    }

    fn modification(&self, selector: &str, config: &ConfigTree) -> Option<ModificationRecord> {
        let classes: Vec<Scalar> = config
            .scalars("class")
            .iter()
            .flat_map(|value| {
                value
                    .to_string()
                    .split_whitespace()
                    .map(Scalar::from)
                    .collect::<Vec<_>>()
            })
            .collect();

        if classes.is_empty() {
            return None;
        }
        Some(ModificationRecord::new().with_attribute(media(config), selector, "class", classes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modifiers_types::AttrValue;

    fn classes(names: &[&str]) -> AttrValue {
        AttrValue::List(names.iter().map(|n| Scalar::from(*n)).collect())
    }

    #[test]
    fn test_space_separated_string() {
        let config = ConfigTree::new().with("class", "hero  dark");
        let record = CssClassModifier::new().modification("#a", &config).unwrap();
        assert_eq!(record.attributes["all"]["#a"]["class"], classes(&["hero", "dark"]));
    }

    #[test]
    fn test_list_of_classes() {
        let config = ConfigTree::new()
            .with("class", vec![Scalar::from("a b"), Scalar::from("c")])
            .with("media", "print");
        let record = CssClassModifier::new().modification("#a", &config).unwrap();
        assert_eq!(
            record.attributes["print"]["#a"]["class"],
            classes(&["a", "b", "c"])
        );
    }

    #[test]
    fn test_blank_class_is_none() {
        let config = ConfigTree::new().with("class", "   ");
        assert!(CssClassModifier::new().modification("#a", &config).is_none());
        assert!(
            CssClassModifier::new()
                .modification("#a", &ConfigTree::new())
                .is_none()
        );
    }
}
