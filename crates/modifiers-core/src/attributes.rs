/*
 * attributes.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Deep merge of attribute trees.
 */

//! Deep merge of attribute trees.
//!
//! Attribute trees are nested three levels deep: media, selector, then
//! attribute name. Leaves merge by kind:
//!
//! - **Lists** (e.g. `class`) are unioned: the target's items keep their
//!   order, unseen incoming items are appended, duplicates are dropped.
//! - **Scalars** are first-write-wins: once a modifier has decided an
//!   attribute, later modifiers cannot override it.

use indexmap::IndexMap;
use modifiers_types::{AttrValue, AttributeMap, Scalar};

/// Merge `incoming` into `target` in place.
pub fn merge_attributes(target: &mut AttributeMap, incoming: &AttributeMap) {
    for (media, selectors) in incoming {
        for (selector, attributes) in selectors {
            if attributes.is_empty() {
                continue;
            }
            let target_attributes = target
                .entry(media.clone())
                .or_default()
                .entry(selector.clone())
                .or_default();
            for (key, value) in attributes {
                merge_value(target_attributes, key, value);
            }
        }
    }
}

fn merge_value(target: &mut IndexMap<String, AttrValue>, key: &str, incoming: &AttrValue) {
    match incoming {
        AttrValue::List(items) => {
            let merged = match target.get(key) {
                Some(AttrValue::List(existing)) => union(existing, items),
                // A scalar already in place joins the list as its first item
                Some(AttrValue::Scalar(existing)) => union(std::slice::from_ref(existing), items),
                None => union(&[], items),
            };
            target.insert(key.to_string(), AttrValue::List(merged));
        }
        AttrValue::Scalar(value) => {
            if !target.contains_key(key) {
                target.insert(key.to_string(), AttrValue::Scalar(value.clone()));
            }
        }
    }
}

/// Concatenate and deduplicate, keeping first-seen order.
///
/// Linear scan: `Scalar` holds `f64`, so it is not `Hash` and cannot go in
/// an `IndexSet`. Attribute lists are short.
fn union(existing: &[Scalar], incoming: &[Scalar]) -> Vec<Scalar> {
    let mut out: Vec<Scalar> = Vec::with_capacity(existing.len() + incoming.len());
    for item in existing.iter().chain(incoming) {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}
