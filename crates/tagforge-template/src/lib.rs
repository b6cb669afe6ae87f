//! Tagforge Template - placeholder, conditional and loop substitution.
//!
//! This crate is the template layer of the Tagforge component framework.
//! It renders a template string against a `serde_json::Value` data object
//! in three fixed passes:
//!
//! 1. Conditional blocks: `{{#if user.active}} ... {{/if}}`
//! 2. Loop blocks: `{{#each items}} {{this}} {{/each}}`
//! 3. Plain placeholders: `{{ user.name }}`
//!
//! All constructs accept dotted paths, resolved by [`resolve`]. A path that
//! cannot be resolved is never an error: conditionals suppress their body,
//! loops emit nothing, placeholders render as the empty string.
//!
//! # Quick Start
//!
//! ```rust
//! use tagforge_template::render;
//! use serde_json::json;
//!
//! let data = json!({
//!     "user": { "name": "Ana" },
//!     "items": [1, 2, 3],
//! });
//!
//! let output = render(
//!     "<p>{{ user.name }}</p>{{#each items}}<li>{{this}}</li>{{/each}}",
//!     &data,
//! );
//! assert_eq!(output, "<p>Ana</p><li>1</li><li>2</li><li>3</li>");
//! ```
//!
//! # No HTML escaping
//!
//! Interpolated values are inserted verbatim. The engine assumes the caller
//! controls both the template and the data; it is not safe to render
//! untrusted data into markup that reaches a real document.
//!
//! # Limitations
//!
//! Blocks of the same kind do not nest (`{{#if}}` inside `{{#if}}`,
//! `{{#each}}` inside `{{#each}}`). Rendering such a template produces
//! unspecified output; use [`validate_template`] to reject it up front.

mod engine;
mod error;
mod path;

pub use engine::{render, validate_template};
pub use error::{Result, TemplateError};
pub use path::{resolve, textualize, truthy};
