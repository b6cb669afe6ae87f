//! Component definitions.
//!
//! A [`ComponentSpec`] is the immutable description of a custom element:
//! tag name, prop schema, initial state, template, style, lifecycle
//! callbacks, methods for `@event` directives, watchers and plugins. It is
//! built once, registered with a
//! [`CustomElementRegistry`](crate::CustomElementRegistry), and shared by
//! every instance of the element.
//!
//! # Example
//!
//! ```rust
//! use tagforge::{BindingMode, ComponentSpec, PropSpec, PropType};
//! use serde_json::json;
//!
//! let spec = ComponentSpec::new("user-card")
//!     .prop("size", PropSpec::new(PropType::Number).default(json!(1)).reflect())
//!     .state("name", json!("Ana"))
//!     .template("<p>{{ name }} ({{ size }})</p>")
//!     .style("p { margin: 0; }")
//!     .method("reset", |_event, component| {
//!         let mut patch = serde_json::Map::new();
//!         patch.insert("name".into(), json!(""));
//!         component.set_state(patch);
//!     })
//!     .watch("name", |_component, new, old| {
//!         println!("name: {} -> {}", old, new);
//!     })
//!     .binding_mode(BindingMode::OnCommit);
//! assert_eq!(spec.tag(), "user-card");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use serde_json::{Map, Value};
use tagforge_dom::Event;

use crate::binding::BindingMode;
use crate::element::Component;
use crate::plugin::PluginInit;
use crate::props::PropSpec;

/// A method invoked by an `@event` directive: receives the event and the
/// live component instance.
pub type MethodFn = Rc<dyn Fn(&Event, &Component)>;

/// A watcher invoked when its key's value changes between renders:
/// receives the live instance, the new value and the old value.
pub type WatcherFn = Rc<dyn Fn(&Component, &Value, &Value)>;

/// A definition-level lifecycle callback.
pub type LifecycleFn = Rc<dyn Fn(&Component)>;

/// The immutable definition of a custom element.
pub struct ComponentSpec {
    pub(crate) tag: String,
    pub(crate) props: Vec<(String, PropSpec)>,
    pub(crate) initial_state: Map<String, Value>,
    pub(crate) template: String,
    pub(crate) style: String,
    pub(crate) on_connected: Option<LifecycleFn>,
    pub(crate) on_disconnected: Option<LifecycleFn>,
    pub(crate) before_render: Option<LifecycleFn>,
    pub(crate) after_render: Option<LifecycleFn>,
    pub(crate) methods: HashMap<String, MethodFn>,
    pub(crate) watchers: Vec<(String, WatcherFn)>,
    pub(crate) plugins: Vec<PluginInit>,
    pub(crate) binding_mode: BindingMode,
}

impl ComponentSpec {
    /// Starts a definition for the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Vec::new(),
            initial_state: Map::new(),
            template: String::new(),
            style: String::new(),
            on_connected: None,
            on_disconnected: None,
            before_render: None,
            after_render: None,
            methods: HashMap::new(),
            watchers: Vec::new(),
            plugins: Vec::new(),
            binding_mode: BindingMode::Immediate,
        }
    }

    /// Adds a prop schema entry.
    pub fn prop(mut self, name: impl Into<String>, spec: PropSpec) -> Self {
        self.props.push((name.into(), spec));
        self
    }

    /// Seeds one key of the initial state.
    pub fn state(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.initial_state.insert(key.into(), value.into());
        self
    }

    /// Sets the HTML template string.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Sets the style text wrapped around every render.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Registers a method for `@event` directives.
    pub fn method(
        mut self,
        name: impl Into<String>,
        method: impl Fn(&Event, &Component) + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Rc::new(method));
        self
    }

    /// Registers a watcher on a state or prop key. Watchers fire in
    /// declaration order.
    pub fn watch(
        mut self,
        key: impl Into<String>,
        watcher: impl Fn(&Component, &Value, &Value) + 'static,
    ) -> Self {
        self.watchers.push((key.into(), Rc::new(watcher)));
        self
    }

    /// Registers a plugin initializer. Plugins hook in registration order.
    pub fn plugin(mut self, init: PluginInit) -> Self {
        self.plugins.push(init);
        self
    }

    /// Selects the two-way binding update-timing policy.
    pub fn binding_mode(mut self, mode: BindingMode) -> Self {
        self.binding_mode = mode;
        self
    }

    /// Called once when an instance joins the tree, after its first render.
    pub fn on_connected(mut self, callback: impl Fn(&Component) + 'static) -> Self {
        self.on_connected = Some(Rc::new(callback));
        self
    }

    /// Called when an instance is detached.
    pub fn on_disconnected(mut self, callback: impl Fn(&Component) + 'static) -> Self {
        self.on_disconnected = Some(Rc::new(callback));
        self
    }

    /// Called at the start of every render pass.
    pub fn before_render(mut self, callback: impl Fn(&Component) + 'static) -> Self {
        self.before_render = Some(Rc::new(callback));
        self
    }

    /// Called at the end of every render pass.
    pub fn after_render(mut self, callback: impl Fn(&Component) + 'static) -> Self {
        self.after_render = Some(Rc::new(callback));
        self
    }

    /// The element tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute names observed for changes: the reflected props.
    pub fn observed_attributes(&self) -> Vec<&str> {
        self.props
            .iter()
            .filter(|(_, p)| p.reflect)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub(crate) fn is_observed(&self, name: &str) -> bool {
        self.props
            .iter()
            .any(|(prop_name, p)| p.reflect && prop_name == name)
    }

    pub(crate) fn prop_spec(&self, name: &str) -> Option<&PropSpec> {
        self.props
            .iter()
            .find(|(prop_name, _)| prop_name == name)
            .map(|(_, p)| p)
    }

    /// Derives current prop values from the attribute store. Recomputed on
    /// every render; never cached.
    pub(crate) fn collect_props(&self, attributes: &BTreeMap<String, String>) -> Map<String, Value> {
        let mut props = Map::new();
        for (name, spec) in &self.props {
            let raw = attributes.get(name).map(String::as_str);
            props.insert(name.clone(), spec.prop_type.decode(raw));
        }
        props
    }
}

impl std::fmt::Debug for ComponentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentSpec")
            .field("tag", &self.tag)
            .field("props", &self.props.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("watchers", &self.watchers.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("plugins", &self.plugins.len())
            .field("binding_mode", &self.binding_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::PropType;
    use serde_json::json;

    #[test]
    fn observed_attributes_are_reflected_props_only() {
        let spec = ComponentSpec::new("x-a")
            .prop("size", PropSpec::new(PropType::Number).reflect())
            .prop("hint", PropSpec::new(PropType::String));
        assert_eq!(spec.observed_attributes(), vec!["size"]);
        assert!(spec.is_observed("size"));
        assert!(!spec.is_observed("hint"));
    }

    #[test]
    fn collect_props_decodes_against_attributes() {
        let spec = ComponentSpec::new("x-a")
            .prop("size", PropSpec::new(PropType::Number))
            .prop("on", PropSpec::new(PropType::Boolean))
            .prop("label", PropSpec::new(PropType::String));

        let mut attrs = BTreeMap::new();
        attrs.insert("size".to_string(), "3".to_string());

        let props = spec.collect_props(&attrs);
        assert_eq!(props.get("size"), Some(&json!(3)));
        assert_eq!(props.get("on"), Some(&json!(false)));
        assert_eq!(props.get("label"), Some(&Value::Null));
    }
}
