//! The custom-element registry.
//!
//! An explicit registry object rather than a process-wide singleton: the
//! embedding host owns one (or several, in tests) and registers component
//! definitions with define-once semantics. It also plays the host's role of
//! instantiating elements and driving their connect lifecycle, which is
//! what a browser binding would do via `customElements.define`.

use std::collections::HashMap;
use std::rc::Rc;

use crate::component::ComponentSpec;
use crate::element::Component;
use crate::error::{ComponentError, Result};

/// Registry of component definitions, keyed by tag name.
#[derive(Debug, Default)]
pub struct CustomElementRegistry {
    definitions: HashMap<String, Rc<ComponentSpec>>,
}

impl CustomElementRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition unless its tag is already taken.
    ///
    /// Returns `true` when the definition was stored, `false` when an
    /// earlier definition for the same tag already existed (in which case
    /// the call is a no-op, matching "define once" semantics).
    pub fn register_if_absent(&mut self, spec: ComponentSpec) -> bool {
        if self.definitions.contains_key(spec.tag()) {
            return false;
        }
        self.definitions
            .insert(spec.tag().to_string(), Rc::new(spec));
        true
    }

    /// Whether a definition exists for the tag.
    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.contains_key(tag)
    }

    /// The definition registered for the tag, if any.
    pub fn spec(&self, tag: &str) -> Option<Rc<ComponentSpec>> {
        self.definitions.get(tag).cloned()
    }

    /// Instantiates an element of the given tag without attaching it:
    /// default attributes and initial state are seeded and plugin hook
    /// objects created, but nothing renders until
    /// [`Component::connected_callback`] runs.
    pub fn create(&self, tag: &str) -> Result<Component> {
        let spec = self
            .definitions
            .get(tag)
            .cloned()
            .ok_or_else(|| ComponentError::UnknownTag(tag.to_string()))?;
        Ok(Component::new(spec))
    }

    /// Instantiates and immediately connects an element: the host-side
    /// equivalent of inserting it into the document.
    pub fn connect(&self, tag: &str) -> Result<Component> {
        let component = self.create(tag)?;
        component.connected_callback();
        Ok(component)
    }
}
