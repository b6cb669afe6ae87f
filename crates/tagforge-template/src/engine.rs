//! The three-pass template engine.
//!
//! Each pass completes over the whole string before the next begins, so
//! later passes only see what earlier passes left behind:
//!
//! 1. `{{#if path}}body{{/if}}` - body kept verbatim iff the path resolves
//!    to a truthy value.
//! 2. `{{#each path}}body{{/each}}` - body emitted once per array element,
//!    with `{{this}}` / `{{this.subpath}}` resolved against the element.
//! 3. `{{ path }}` - textualized value, empty string when unresolved.
//!
//! Placeholders left inside a loop body that are not `this`-relative fall
//! through to pass 3 and resolve against the outer data object.

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};
use serde_json::Value;

use crate::error::{Result, TemplateError};
use crate::path::{resolve, textualize, truthy};

static IF_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{#if\s+([\w.]+)\s*\}\}(.*?)\{\{/if\}\}").unwrap()
});

static EACH_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{#each\s+([\w.]+)\s*\}\}(.*?)\{\{/each\}\}").unwrap()
});

static THIS_SUBPATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*this\.([\w.]+)\s*\}\}").unwrap());

static THIS_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{\s*this\s*\}\}").unwrap());

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{\s*([\w.]+)\s*\}\}").unwrap());

static BLOCK_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(#if|#each|/if|/each)\b").unwrap());

/// Renders a template string against a data object.
///
/// Never fails: unresolved paths render as nothing, non-array loop subjects
/// emit the empty string. Values are inserted verbatim, without HTML
/// escaping.
///
/// ```rust
/// use tagforge_template::render;
/// use serde_json::json;
///
/// let data = json!({"ok": true, "name": "Ana"});
/// assert_eq!(
///     render("{{#if ok}}Hi {{ name }}{{/if}}", &data),
///     "Hi Ana",
/// );
/// ```
pub fn render(template: &str, data: &Value) -> String {
    let conditionals = IF_BLOCK.replace_all(template, |caps: &Captures| {
        let taken = resolve(&caps[1], data).map(truthy).unwrap_or(false);
        if taken {
            caps[2].to_string()
        } else {
            String::new()
        }
    });

    let loops = EACH_BLOCK.replace_all(&conditionals, |caps: &Captures| {
        match resolve(&caps[1], data) {
            Some(Value::Array(items)) => expand_loop_body(&caps[2], items),
            _ => String::new(),
        }
    });

    PLACEHOLDER
        .replace_all(&loops, |caps: &Captures| {
            resolve(&caps[1], data).map(textualize).unwrap_or_default()
        })
        .into_owned()
}

/// Emits the loop body once per element, resolving `this` references.
fn expand_loop_body(body: &str, items: &[Value]) -> String {
    let mut out = String::new();
    for item in items {
        let with_subpaths = THIS_SUBPATH.replace_all(body, |caps: &Captures| {
            resolve(&caps[1], item).map(textualize).unwrap_or_default()
        });
        let text = textualize(item);
        out.push_str(&THIS_ITEM.replace_all(&with_subpaths, NoExpand(&text)));
    }
    out
}

/// Checks a template for block constructs the engine cannot render.
///
/// The render path is deliberately best-effort and never calls this; use it
/// at component-registration time or in tests to reject templates with
/// unbalanced or same-kind-nested `{{#if}}` / `{{#each}}` blocks.
pub fn validate_template(template: &str) -> Result<()> {
    let mut if_depth: usize = 0;
    let mut each_depth: usize = 0;
    let mut if_opens = 0;
    let mut if_closes = 0;
    let mut each_opens = 0;
    let mut each_closes = 0;

    for caps in BLOCK_TOKEN.captures_iter(template) {
        match &caps[1] {
            "#if" => {
                if if_depth > 0 {
                    return Err(TemplateError::NestedBlock { construct: "if" });
                }
                if_depth += 1;
                if_opens += 1;
            }
            "/if" => {
                if_depth = if_depth.saturating_sub(1);
                if_closes += 1;
            }
            "#each" => {
                if each_depth > 0 {
                    return Err(TemplateError::NestedBlock { construct: "each" });
                }
                each_depth += 1;
                each_opens += 1;
            }
            "/each" => {
                each_depth = each_depth.saturating_sub(1);
                each_closes += 1;
            }
            _ => unreachable!("token regex only captures block markers"),
        }
    }

    if if_opens != if_closes {
        return Err(TemplateError::UnbalancedBlock {
            construct: "if",
            open: if_opens,
            close: if_closes,
        });
    }
    if each_opens != each_closes {
        return Err(TemplateError::UnbalancedBlock {
            construct: "each",
            open: each_opens,
            close: each_closes,
        });
    }
    Ok(())
}


#[cfg(test)]
mod properties {
    use super::render;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        // Placeholder-only rendering is a pure function of (template, data).
        #[test]
        fn placeholder_rendering_is_pure(
            key in "[a-z]{1,8}",
            val in "[a-zA-Z0-9 .,!-]{0,24}",
        ) {
            let template = format!("Hello {{{{ {} }}}}!", key);
            let data = json!({ key.clone(): val.clone() });
            let first = render(&template, &data);
            let second = render(&template, &data);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first, format!("Hello {}!", val));
        }

        // Output of a placeholder-only template contains no further
        // constructs, so re-rendering it is the identity.
        #[test]
        fn placeholder_output_is_stable_under_re_render(
            key in "[a-z]{1,8}",
            val in "[a-zA-Z0-9 ]{0,24}",
        ) {
            let template = format!("<p>{{{{ {} }}}}</p>", key);
            let data = json!({ key: val });
            let once = render(&template, &data);
            prop_assert_eq!(render(&once, &data), once);
        }

        // Unresolved keys always yield the empty string.
        #[test]
        fn unresolved_keys_render_empty(key in "[a-z]{1,8}") {
            let template = format!("[{{{{ {} }}}}]", key);
            prop_assert_eq!(render(&template, &json!({})), "[]");
        }
    }
}
