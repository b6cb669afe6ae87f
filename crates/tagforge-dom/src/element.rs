//! Element handles over committed markup.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::Event;

/// A listener attached to an element for a named event.
pub type ListenerFn = Rc<dyn Fn(&Event)>;

/// A cheaply-cloneable handle to one element in committed markup.
///
/// Handles share state: cloning a handle and setting its value is visible
/// through every other clone. When the owning [`ScopedRoot`] commits new
/// markup, it drops its handles; clones held elsewhere keep working but
/// refer to an element that is no longer in the tree (a detached node).
///
/// [`ScopedRoot`]: crate::ScopedRoot
#[derive(Clone)]
pub struct ElementHandle {
    inner: Rc<RefCell<ElementInner>>,
}

struct ElementInner {
    tag: String,
    attributes: Vec<(String, String)>,
    value: String,
    listeners: Vec<(String, ListenerFn)>,
}

impl ElementHandle {
    pub(crate) fn new(tag: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementInner {
                tag,
                attributes,
                value: String::new(),
                listeners: Vec::new(),
            })),
        }
    }

    /// The element's tag name as written in the markup.
    pub fn tag_name(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    /// The value of an attribute, or `None` when absent. Bare attributes
    /// (`<input disabled>`) report an empty string.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    /// Whether the attribute is present at all.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.inner.borrow().attributes.iter().any(|(n, _)| n == name)
    }

    /// All attributes in markup order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.inner.borrow().attributes.clone()
    }

    /// Attributes whose names start with the given prefix, in markup order.
    pub fn attributes_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        self.inner
            .borrow()
            .attributes
            .iter()
            .filter(|(n, _)| n.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// The element's displayed value (what `target.value` would read).
    pub fn value(&self) -> String {
        self.inner.borrow().value.clone()
    }

    /// Sets the displayed value without firing any event.
    pub fn set_value(&self, value: &str) {
        self.inner.borrow_mut().value = value.to_string();
    }

    /// Registers a listener for a named event.
    pub fn add_listener(&self, event_name: &str, listener: impl Fn(&Event) + 'static) {
        self.inner
            .borrow_mut()
            .listeners
            .push((event_name.to_string(), Rc::new(listener)));
    }

    /// Number of listeners registered for a named event.
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|(n, _)| n == event_name)
            .count()
    }

    /// Delivers an event to every listener registered for its name, in
    /// registration order.
    ///
    /// An event without a value is stamped with the element's current
    /// displayed value first, so handlers observe `target.value` semantics.
    /// Listeners may mutate the element (or dispatch further events)
    /// without deadlocking.
    pub fn dispatch(&self, event: &Event) {
        let delivered = event.stamped_with(&self.value());
        let matching: Vec<ListenerFn> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(n, _)| n == delivered.name())
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in matching {
            listener(&delivered);
        }
    }

    /// Simulates the user typing: updates the displayed value, then fires
    /// one `input` event.
    pub fn input(&self, text: &str) {
        self.set_value(text);
        self.dispatch(&Event::new("input"));
    }

    /// Simulates focus loss: fires one `blur` event carrying the current
    /// displayed value.
    pub fn blur(&self) {
        self.dispatch(&Event::new("blur"));
    }

    /// Fires one `click` event.
    pub fn click(&self) {
        self.dispatch(&Event::new("click"));
    }
}

impl std::fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ElementHandle")
            .field("tag", &inner.tag)
            .field("attributes", &inner.attributes)
            .field("value", &inner.value)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn element() -> ElementHandle {
        ElementHandle::new(
            "input".into(),
            vec![("data-model".into(), "name".into())],
        )
    }

    #[test]
    fn clones_share_state() {
        let a = element();
        let b = a.clone();
        a.set_value("typed");
        assert_eq!(b.value(), "typed");
    }

    #[test]
    fn dispatch_fires_matching_listeners_in_order() {
        let el = element();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&seen);
        el.add_listener("input", move |_| log.borrow_mut().push("first"));
        let log = Rc::clone(&seen);
        el.add_listener("input", move |_| log.borrow_mut().push("second"));
        let log = Rc::clone(&seen);
        el.add_listener("blur", move |_| log.borrow_mut().push("blur"));

        el.dispatch(&Event::new("input"));
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn dispatch_stamps_displayed_value() {
        let el = element();
        el.set_value("ana");
        let seen = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&seen);
        el.add_listener("blur", move |e| {
            *slot.borrow_mut() = e.value().map(str::to_string);
        });
        el.blur();
        assert_eq!(seen.borrow().as_deref(), Some("ana"));
    }

    #[test]
    fn input_updates_value_then_fires() {
        let el = element();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let handle = el.clone();
        el.add_listener("input", move |e| {
            c.set(c.get() + 1);
            assert_eq!(e.value(), Some(handle.value().as_str()));
        });
        el.input("a");
        el.input("ab");
        assert_eq!(count.get(), 2);
        assert_eq!(el.value(), "ab");
    }

    #[test]
    fn listener_may_mutate_element_during_dispatch() {
        let el = element();
        let handle = el.clone();
        el.add_listener("click", move |_| handle.set_value("clicked"));
        el.click();
        assert_eq!(el.value(), "clicked");
    }
}
