//! Declarative event wiring for `@event="methodName"` directives.
//!
//! After every commit, each element carrying directive attributes gets one
//! listener per directive, calling the named entry of the definition's
//! method table with the event and the live component handle. A directive
//! naming a method that does not exist logs a warning and is skipped - it
//! never aborts the render.

use std::rc::Rc;

use crate::element::Component;

/// Wires every `@event` directive in the committed markup. Called by the
/// render core after each commit.
pub(crate) fn bind_event_directives(component: &Component) {
    for element in component.query_by_attribute_prefix("@") {
        for (attribute, method_name) in element.attributes_with_prefix("@") {
            let event_name = attribute[1..].to_string();
            match component.spec().methods.get(&method_name) {
                Some(method) => {
                    let method = Rc::clone(method);
                    let weak = component.downgrade();
                    element.add_listener(&event_name, move |event| {
                        if let Some(component) = weak.upgrade() {
                            method(event, &component);
                        }
                    });
                }
                None => {
                    log::warn!(
                        "method \"{}\" not found in methods for <{}>",
                        method_name,
                        component.tag(),
                    );
                }
            }
        }
    }
}
