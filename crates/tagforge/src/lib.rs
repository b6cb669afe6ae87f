//! Declarative custom elements for a headless host tree.
//!
//! `tagforge` turns a [`ComponentSpec`] - tag name, prop schema, initial
//! state, template, style, methods, watchers, plugins - into live
//! components with a reactive render loop. Definitions are registered with
//! a [`CustomElementRegistry`]; instances re-render synchronously whenever
//! state or an observed attribute changes.
//!
//! Templates use `{{ path }}` placeholders plus `{{#if}}` and `{{#each}}`
//! blocks (see the `tagforge-template` crate). Markup is committed to a
//! [`ScopedRoot`], a headless stand-in for a shadow root, where
//! `data-model` two-way binding and `@event="methodName"` directives are
//! wired after every render.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tagforge::{ComponentSpec, CustomElementRegistry};
//!
//! let mut registry = CustomElementRegistry::new();
//! registry.register_if_absent(
//!     ComponentSpec::new("hello-tag")
//!         .state("name", json!("world"))
//!         .template("<p>hello {{ name }}</p>"),
//! );
//!
//! let component = registry.connect("hello-tag").unwrap();
//! assert_eq!(component.markup(), "<p>hello world</p>");
//!
//! let mut patch = serde_json::Map::new();
//! patch.insert("name".into(), json!("tags"));
//! component.set_state(patch);
//! assert_eq!(component.markup(), "<p>hello tags</p>");
//! ```

mod binding;
mod component;
mod element;
mod error;
mod events;
mod extensions;
mod plugin;
pub mod plugins;
mod props;
mod registry;

pub use binding::BindingMode;
pub use component::{ComponentSpec, LifecycleFn, MethodFn, WatcherFn};
pub use element::{Component, WeakComponent};
pub use error::{ComponentError, Result};
pub use extensions::Extensions;
pub use plugin::{Plugin, PluginInit};
pub use props::{PropSpec, PropType};
pub use registry::CustomElementRegistry;

pub use tagforge_dom::{ElementHandle, Event, ScopedRoot};
pub use tagforge_template::TemplateError;
