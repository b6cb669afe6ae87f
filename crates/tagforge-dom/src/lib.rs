//! Tagforge DOM - the minimal host-tree surface the render core consumes.
//!
//! A real browser owns element registration, shadow trees and event
//! delivery. This crate models only the slice of that surface the Tagforge
//! render core actually needs, headless and in memory:
//!
//! - [`ScopedRoot`]: the scoped root markup is committed to, queryable by
//!   attribute name or attribute-name prefix.
//! - [`ElementHandle`]: a cheaply-cloneable handle to one element in the
//!   committed markup, carrying a displayed value and event listeners.
//! - [`Event`]: the synthetic event the host delivers to listeners.
//!
//! Committing new markup to a root drops every previous element handle the
//! root held, and with them their listeners - which is exactly how the
//! framework avoids duplicate-listener accumulation across renders.
//!
//! # Example
//!
//! ```rust
//! use tagforge_dom::ScopedRoot;
//!
//! let mut root = ScopedRoot::new();
//! root.set_markup(r#"<input data-model="name"><button @click="save">Go</button>"#);
//!
//! let inputs = root.query_by_attribute("data-model");
//! assert_eq!(inputs.len(), 1);
//! inputs[0].set_value("Ana");
//! assert_eq!(inputs[0].value(), "Ana");
//!
//! let buttons = root.query_by_attribute_prefix("@");
//! assert_eq!(buttons[0].attribute("@click").as_deref(), Some("save"));
//! ```

mod element;
mod event;
mod root;
mod scanner;

pub use element::{ElementHandle, ListenerFn};
pub use event::Event;
pub use root::ScopedRoot;
