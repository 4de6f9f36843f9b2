/*
 * css.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * CSS text serialization for modification records.
 */

use modifiers_types::{ALL_MEDIA, CssMap};

/// Serialize a media -> selector -> declarations map into CSS text.
///
/// Output is compact and unescaped; callers supply trusted strings. Rules
/// under the `all` media key are emitted bare, everything else is wrapped
/// in an `@media` block. A space separates `@media` from the query unless
/// the media string already starts with whitespace, so parenthesized
/// queries render as `@media (min-width: 2px){`, not `@media(min-width: 2px){`:
///
/// ```
/// use indexmap::IndexMap;
/// use modifiers_core::serialize_css;
///
/// let mut css = IndexMap::new();
/// css.insert(
///     "print".to_string(),
///     IndexMap::from([(".nav".to_string(), vec!["display:none".to_string()])]),
/// );
/// assert_eq!(serialize_css(&css), "@media print{.nav{display:none}}");
/// ```
pub fn serialize_css(css: &CssMap) -> String {
    let mut out = String::new();

    for (media, selectors) in css {
        let wrapped = media != ALL_MEDIA;
        if wrapped {
            out.push_str("@media");
            if !media.starts_with(char::is_whitespace) {
                out.push(' ');
            }
            out.push_str(media);
            out.push('{');
        }

        for (selector, declarations) in selectors {
            out.push_str(selector);
            out.push('{');
            out.push_str(&declarations.join(";"));
            out.push('}');
        }

        if wrapped {
            out.push('}');
        }
    }

    out
}
