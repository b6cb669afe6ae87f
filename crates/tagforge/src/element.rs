//! Component instances and the render core.
//!
//! A [`Component`] is a cheap-clone handle to one mounted element: its
//! attribute store, reactive state, scoped root and plugin hook objects.
//! The host model is single-threaded and event-driven, so all shared state
//! sits behind `Rc<RefCell<..>>`; hooks, watchers and event listeners get a
//! handle and may freely read or mutate state, including triggering nested
//! renders.
//!
//! The render pipeline runs strictly in order on every pass:
//!
//! 1. recompute props from the prop schema against current attributes;
//! 2. merge `data = props ∪ state` (state wins);
//! 3. fire watchers whose key changed since the last render;
//! 4. pipe the template through each plugin's `transform_template`;
//! 5. render the template, wrap it with the style block, commit;
//! 6. rewire two-way binding and `@event` directives;
//! 7. fire `after_render` hooks;
//! 8. snapshot the rendered data for the next watcher delta.
//!
//! Definition-level and plugin `before_render` hooks fire before step 1.
//! `set_state` runs exactly one synchronous pass per call - no batching.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use serde_json::{Map, Value};

use tagforge_dom::{ElementHandle, ScopedRoot};
use tagforge_template::{textualize, truthy};

use crate::binding;
use crate::component::ComponentSpec;
use crate::events;
use crate::extensions::Extensions;
use crate::plugin::Plugin;
use crate::props::PropType;

struct Inner {
    attributes: BTreeMap<String, String>,
    state: Map<String, Value>,
    previous_rendered_data: Map<String, Value>,
    root: ScopedRoot,
    connected: bool,
}

/// A handle to one mounted component instance.
///
/// Clones share the instance. Obtain instances through
/// [`CustomElementRegistry`](crate::CustomElementRegistry).
#[derive(Clone)]
pub struct Component {
    spec: Rc<ComponentSpec>,
    inner: Rc<RefCell<Inner>>,
    plugins: Rc<RefCell<Vec<Rc<dyn Plugin>>>>,
    extensions: Rc<RefCell<Extensions>>,
}

/// A non-owning handle, used by event listeners and history subscriptions
/// so detached instances can actually drop.
#[derive(Clone)]
pub struct WeakComponent {
    spec: Rc<ComponentSpec>,
    inner: Weak<RefCell<Inner>>,
    plugins: Weak<RefCell<Vec<Rc<dyn Plugin>>>>,
    extensions: Weak<RefCell<Extensions>>,
}

impl WeakComponent {
    /// Upgrades to a live handle if the instance still exists.
    pub fn upgrade(&self) -> Option<Component> {
        Some(Component {
            spec: Rc::clone(&self.spec),
            inner: self.inner.upgrade()?,
            plugins: self.plugins.upgrade()?,
            extensions: self.extensions.upgrade()?,
        })
    }
}

impl Component {
    /// Instantiates a component from its definition: seeds default
    /// attributes and initial state, then runs each plugin initializer in
    /// registration order.
    pub(crate) fn new(spec: Rc<ComponentSpec>) -> Self {
        let mut attributes = BTreeMap::new();
        for (name, prop) in &spec.props {
            if let Some(default) = &prop.default {
                match prop.prop_type {
                    PropType::Boolean => {
                        if truthy(default) {
                            attributes.insert(name.clone(), String::new());
                        }
                    }
                    _ => {
                        attributes.insert(name.clone(), textualize(default));
                    }
                }
            }
        }

        let state = spec.initial_state.clone();
        let mut previous = spec.collect_props(&attributes);
        for (key, value) in &state {
            previous.insert(key.clone(), value.clone());
        }

        let component = Self {
            spec: Rc::clone(&spec),
            inner: Rc::new(RefCell::new(Inner {
                attributes,
                state,
                previous_rendered_data: previous,
                root: ScopedRoot::new(),
                connected: false,
            })),
            plugins: Rc::new(RefCell::new(Vec::new())),
            extensions: Rc::new(RefCell::new(Extensions::new())),
        };

        let hook_objects: Vec<Rc<dyn Plugin>> = spec
            .plugins
            .iter()
            .map(|init| Rc::from(init(&component)))
            .collect();
        *component.plugins.borrow_mut() = hook_objects;

        component
    }

    /// The element's tag name.
    pub fn tag(&self) -> &str {
        self.spec.tag()
    }

    /// The component definition this instance was created from.
    pub fn spec(&self) -> &ComponentSpec {
        &self.spec
    }

    /// Downgrades to a non-owning handle.
    pub fn downgrade(&self) -> WeakComponent {
        WeakComponent {
            spec: Rc::clone(&self.spec),
            inner: Rc::downgrade(&self.inner),
            plugins: Rc::downgrade(&self.plugins),
            extensions: Rc::downgrade(&self.extensions),
        }
    }

    // STATE

    /// Reads one state key.
    pub fn get_state(&self, key: &str) -> Option<Value> {
        self.inner.borrow().state.get(key).cloned()
    }

    /// Snapshot of the entire state map.
    pub fn state(&self) -> Map<String, Value> {
        self.inner.borrow().state.clone()
    }

    /// Shallow-merges the partial into state (later keys overwrite), then
    /// synchronously runs exactly one render pass.
    pub fn set_state(&self, partial: Map<String, Value>) {
        {
            let mut inner = self.inner.borrow_mut();
            for (key, value) in partial {
                inner.state.insert(key, value);
            }
        }
        self.render();
    }

    /// Single-key convenience for [`set_state`](Self::set_state).
    pub fn set_state_entry(&self, key: impl Into<String>, value: impl Into<Value>) {
        let mut partial = Map::new();
        partial.insert(key.into(), value.into());
        self.set_state(partial);
    }

    /// Writes one state key without rendering. Used by the `OnCommit`
    /// binding policy so displayed value and state never drift mid-edit.
    pub(crate) fn write_state_untracked(&self, key: &str, value: Value) {
        self.inner
            .borrow_mut()
            .state
            .insert(key.to_string(), value);
    }

    // ATTRIBUTES & PROPS

    /// Reads an attribute from the instance's attribute store.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.borrow().attributes.get(name).cloned()
    }

    /// Sets an attribute. Changing an observed attribute on a connected
    /// instance re-renders.
    pub fn set_attribute(&self, name: &str, value: &str) {
        {
            let mut inner = self.inner.borrow_mut();
            inner
                .attributes
                .insert(name.to_string(), value.to_string());
        }
        self.attribute_changed(name);
    }

    /// Removes an attribute, with the same re-render rule as
    /// [`set_attribute`](Self::set_attribute).
    pub fn remove_attribute(&self, name: &str) {
        {
            self.inner.borrow_mut().attributes.remove(name);
        }
        self.attribute_changed(name);
    }

    fn attribute_changed(&self, name: &str) {
        if self.is_connected() && self.spec.is_observed(name) {
            self.render();
        }
    }

    /// Typed read of a declared prop, decoded from its attribute.
    pub fn prop(&self, name: &str) -> Option<Value> {
        let prop = self.spec.prop_spec(name)?;
        let raw = self.attribute(name);
        Some(prop.prop_type().decode(raw.as_deref()))
    }

    /// Typed write of a declared prop. Only reflected props write back to
    /// their attribute; truthy booleans become presence attributes, falsy
    /// ones remove the attribute.
    pub fn set_prop(&self, name: &str, value: &Value) {
        let Some(prop) = self.spec.prop_spec(name) else {
            return;
        };
        if !prop.is_reflected() {
            return;
        }
        match prop.prop_type().encode(value) {
            Some(text) => self.set_attribute(name, &text),
            None => self.remove_attribute(name),
        }
    }

    /// The data object the last render would see right now: current props
    /// merged with current state, state winning on collisions.
    pub fn rendered_data(&self) -> Map<String, Value> {
        let inner = self.inner.borrow();
        let mut data = self.spec.collect_props(&inner.attributes);
        for (key, value) in &inner.state {
            data.insert(key.clone(), value.clone());
        }
        data
    }

    // LIFECYCLE

    /// Whether the instance is currently attached.
    pub fn is_connected(&self) -> bool {
        self.inner.borrow().connected
    }

    /// Host notification: the element joined the tree. Runs the first
    /// render, then the definition's `on_connected`, then each plugin's, in
    /// registration order.
    pub fn connected_callback(&self) {
        {
            self.inner.borrow_mut().connected = true;
        }
        self.render();
        if let Some(callback) = &self.spec.on_connected {
            callback(self);
        }
        for plugin in self.plugins_snapshot() {
            plugin.on_connected(self);
        }
    }

    /// Host notification: the element left the tree. Fires the definition's
    /// `on_disconnected`, then each plugin's, in registration order.
    pub fn disconnected_callback(&self) {
        if let Some(callback) = &self.spec.on_disconnected {
            callback(self);
        }
        for plugin in self.plugins_snapshot() {
            plugin.on_disconnected(self);
        }
        self.inner.borrow_mut().connected = false;
    }

    // RENDERED CONTENT

    /// The markup committed by the last render.
    pub fn markup(&self) -> String {
        self.inner.borrow().root.markup().to_string()
    }

    /// Elements in the committed markup carrying the named attribute.
    pub fn query_by_attribute(&self, name: &str) -> Vec<ElementHandle> {
        self.inner.borrow().root.query_by_attribute(name)
    }

    /// Elements carrying an attribute with the given name prefix.
    pub fn query_by_attribute_prefix(&self, prefix: &str) -> Vec<ElementHandle> {
        self.inner.borrow().root.query_by_attribute_prefix(prefix)
    }

    // EXTENSIONS

    /// Attaches a typed value to the instance (plugin capability surface).
    pub fn insert_extension<T: 'static>(&self, value: T) {
        self.extensions.borrow_mut().insert(value);
    }

    /// Clones a typed value previously attached to the instance.
    pub fn extension<T: Clone + 'static>(&self) -> Option<T> {
        self.extensions.borrow().get::<T>().cloned()
    }

    // RENDER

    fn plugins_snapshot(&self) -> Vec<Rc<dyn Plugin>> {
        self.plugins.borrow().clone()
    }

    /// One full render pass. Synchronous and total; never fails.
    pub(crate) fn render(&self) {
        if let Some(callback) = &self.spec.before_render {
            callback(self);
        }
        for plugin in self.plugins_snapshot() {
            plugin.before_render(self);
        }

        // Steps 1-2: derive props, merge state over them.
        let (data, previous) = {
            let inner = self.inner.borrow();
            let mut data = self.spec.collect_props(&inner.attributes);
            for (key, value) in &inner.state {
                data.insert(key.clone(), value.clone());
            }
            (data, inner.previous_rendered_data.clone())
        };

        // Step 3: watchers see the merged data, so prop changes fire too.
        for (key, watcher) in &self.spec.watchers {
            let new = data.get(key);
            let old = previous.get(key);
            if new != old {
                let new = new.cloned().unwrap_or(Value::Null);
                let old = old.cloned().unwrap_or(Value::Null);
                watcher(self, &new, &old);
            }
        }

        // Step 4: plugin template transforms, chained in order.
        let data_value = Value::Object(data.clone());
        let mut template = self.spec.template.clone();
        for plugin in self.plugins_snapshot() {
            template = plugin.transform_template(template, &data_value, self);
        }

        // Step 5: render and commit.
        let body = tagforge_template::render(&template, &data_value);
        let html = if self.spec.style.is_empty() {
            body
        } else {
            format!("<style>{}</style>\n{}", self.spec.style, body)
        };
        self.inner.borrow_mut().root.set_markup(&html);

        // Step 6: rewire against the fresh markup. Old listeners died with
        // the old elements.
        binding::bind_model_elements(self);
        events::bind_event_directives(self);

        // Step 7.
        if let Some(callback) = &self.spec.after_render {
            callback(self);
        }
        for plugin in self.plugins_snapshot() {
            plugin.after_render(self);
        }

        // Step 8.
        self.inner.borrow_mut().previous_rendered_data = data;
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Component")
            .field("tag", &self.spec.tag)
            .field("connected", &inner.connected)
            .field("state", &inner.state)
            .field("attributes", &inner.attributes)
            .finish()
    }
}
