//! Two-way binding between `data-model` elements and component state.
//!
//! Every element in the committed markup carrying `data-model="key"` is
//! seeded from `state[key]` and wired so user edits flow back into state.
//! The update timing is the definition's [`BindingMode`]:
//!
//! - [`Immediate`](BindingMode::Immediate): every `input` event calls
//!   `set_state`, so each keystroke renders (and fires watchers) once.
//! - [`OnCommit`](BindingMode::OnCommit): `input` events write state
//!   directly without rendering - displayed value and state never drift
//!   while the user types - and the `blur` event runs the single
//!   `set_state` for the whole editing session.

use serde_json::Value;

use tagforge_template::textualize;

use crate::element::Component;

/// Update-timing policy for two-way binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingMode {
    /// Re-render on every input event (one render per keystroke).
    #[default]
    Immediate,
    /// Track state silently while typing; render once on focus loss.
    OnCommit,
}

/// Wires every `data-model` element in the committed markup. Called by the
/// render core after each commit.
pub(crate) fn bind_model_elements(component: &Component) {
    let mode = component.spec().binding_mode;
    for element in component.query_by_attribute("data-model") {
        let Some(key) = element.attribute("data-model") else {
            continue;
        };

        if let Some(value) = component.get_state(&key) {
            element.set_value(&textualize(&value));
        }

        match mode {
            BindingMode::Immediate => {
                let weak = component.downgrade();
                let key = key.clone();
                element.add_listener("input", move |event| {
                    if let Some(component) = weak.upgrade() {
                        let text = event.value().unwrap_or_default().to_string();
                        component.set_state_entry(key.clone(), Value::String(text));
                    }
                });
            }
            BindingMode::OnCommit => {
                let weak = component.downgrade();
                let silent_key = key.clone();
                element.add_listener("input", move |event| {
                    if let Some(component) = weak.upgrade() {
                        let text = event.value().unwrap_or_default().to_string();
                        component.write_state_untracked(&silent_key, Value::String(text));
                    }
                });

                let weak = component.downgrade();
                element.add_listener("blur", move |event| {
                    if let Some(component) = weak.upgrade() {
                        let text = event.value().unwrap_or_default().to_string();
                        component.set_state_entry(key.clone(), Value::String(text));
                    }
                });
            }
        }
    }
}
