//! Two-way binding under both update-timing policies.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;

use tagforge::{BindingMode, Component, ComponentSpec, CustomElementRegistry, ElementHandle};

fn connect(spec: ComponentSpec) -> Component {
    let mut registry = CustomElementRegistry::new();
    let tag = spec.tag().to_string();
    registry.register_if_absent(spec);
    registry.connect(&tag).unwrap()
}

/// Handles die with each commit, so the model element must be re-queried
/// after anything that renders.
fn model_input(component: &Component) -> ElementHandle {
    component.query_by_attribute("data-model").remove(0)
}

#[test]
fn model_elements_are_seeded_from_state() {
    let component = connect(
        ComponentSpec::new("x-form")
            .state("name", json!("Ana"))
            .template(r#"<input data-model="name">"#),
    );
    assert_eq!(model_input(&component).value(), "Ana");
}

#[test]
fn immediate_mode_renders_every_keystroke() {
    let renders = Rc::new(Cell::new(0));
    let counter = Rc::clone(&renders);

    let component = connect(
        ComponentSpec::new("x-live")
            .state("name", json!(""))
            .template(r#"<p>{{ name }}</p><input data-model="name">"#)
            .after_render(move |_| counter.set(counter.get() + 1)),
    );
    assert_eq!(renders.get(), 1);

    model_input(&component).input("A");
    model_input(&component).input("An");
    model_input(&component).input("Ana");

    assert_eq!(renders.get(), 4);
    assert_eq!(component.get_state("name"), Some(json!("Ana")));
    assert!(component.markup().contains("<p>Ana</p>"));
}

#[test]
fn on_commit_mode_renders_once_on_blur() {
    let renders = Rc::new(Cell::new(0));
    let counter = Rc::clone(&renders);
    let watcher_fires = Rc::new(Cell::new(0));
    let fires = Rc::clone(&watcher_fires);

    let component = connect(
        ComponentSpec::new("x-commit")
            .state("name", json!(""))
            .template(r#"<p>{{ name }}</p><input data-model="name">"#)
            .binding_mode(BindingMode::OnCommit)
            .after_render(move |_| counter.set(counter.get() + 1))
            .watch("name", move |_component, _new, _old| {
                fires.set(fires.get() + 1);
            }),
    );
    assert_eq!(renders.get(), 1);

    // No renders while typing: the element keeps showing what the user
    // typed and state silently tracks it.
    let field = model_input(&component);
    field.input("A");
    field.input("An");
    field.input("Ana");
    assert_eq!(renders.get(), 1);
    assert_eq!(component.get_state("name"), Some(json!("Ana")));
    assert!(component.markup().contains("<p></p>"));

    // Focus loss commits the whole editing session in one pass.
    field.blur();
    assert_eq!(renders.get(), 2);
    assert_eq!(watcher_fires.get(), 1);
    assert!(component.markup().contains("<p>Ana</p>"));
}

#[test]
fn rewired_binding_survives_renders() {
    let component = connect(
        ComponentSpec::new("x-again")
            .state("name", json!(""))
            .template(r#"<input data-model="name">"#),
    );

    model_input(&component).input("first");
    assert_eq!(component.get_state("name"), Some(json!("first")));

    // A fresh element from the latest commit is live and pre-seeded.
    let fresh = model_input(&component);
    assert_eq!(fresh.value(), "first");
    fresh.input("second");
    assert_eq!(component.get_state("name"), Some(json!("second")));
}

#[test]
fn non_string_state_seeds_as_text() {
    let component = connect(
        ComponentSpec::new("x-typed")
            .state("count", json!(7))
            .template(r#"<input data-model="count">"#),
    );
    assert_eq!(model_input(&component).value(), "7");
}
