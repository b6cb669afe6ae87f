//! End-to-end coverage of the render core: state, watchers, props,
//! lifecycle hooks, plugin ordering and event directives.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::{json, Map, Value};

use tagforge::{
    Component, ComponentSpec, CustomElementRegistry, Plugin, PluginInit, PropSpec, PropType,
};

fn connect(spec: ComponentSpec) -> Component {
    let mut registry = CustomElementRegistry::new();
    let tag = spec.tag().to_string();
    registry.register_if_absent(spec);
    registry.connect(&tag).unwrap()
}

#[test]
fn set_state_rerenders_synchronously() {
    let component = connect(
        ComponentSpec::new("x-counter")
            .state("count", json!(0))
            .template("<p>count: {{ count }}</p>"),
    );
    assert_eq!(component.markup(), "<p>count: 0</p>");

    component.set_state_entry("count", 1);
    assert_eq!(component.markup(), "<p>count: 1</p>");
}

#[test]
fn state_wins_over_props_on_collision() {
    let component = connect(
        ComponentSpec::new("x-clash")
            .prop("label", PropSpec::new(PropType::String).default(json!("from-prop")))
            .state("label", json!("from-state"))
            .template("<p>{{ label }}</p>"),
    );
    assert_eq!(component.markup(), "<p>from-state</p>");
}

#[test]
fn watcher_fires_once_per_change_with_new_and_old() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);

    let component = connect(
        ComponentSpec::new("x-watched")
            .state("count", json!(0))
            .template("<p>{{ count }}</p>")
            .watch("count", move |_component, new, old| {
                log.borrow_mut().push((old.clone(), new.clone()));
            }),
    );
    // The first render finds no delta against the seeded snapshot.
    assert!(seen.borrow().is_empty());

    component.set_state_entry("count", 1);
    assert_eq!(*seen.borrow(), vec![(json!(0), json!(1))]);

    // Same value again: no delta, no dispatch.
    component.set_state_entry("count", 1);
    assert_eq!(seen.borrow().len(), 1);

    component.set_state_entry("count", 2);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn watchers_observe_reflected_prop_changes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);

    let component = connect(
        ComponentSpec::new("x-sized")
            .prop("size", PropSpec::new(PropType::Number).default(json!(1)).reflect())
            .template("<p>{{ size }}</p>")
            .watch("size", move |_component, new, old| {
                log.borrow_mut().push((old.clone(), new.clone()));
            }),
    );
    assert_eq!(component.markup(), "<p>1</p>");

    component.set_attribute("size", "5");
    assert_eq!(component.markup(), "<p>5</p>");
    assert_eq!(*seen.borrow(), vec![(json!(1), json!(5))]);
}

#[test]
fn unobserved_attribute_changes_do_not_render() {
    let renders = Rc::new(Cell::new(0));
    let counter = Rc::clone(&renders);

    let component = connect(
        ComponentSpec::new("x-quiet")
            .template("<p>hi</p>")
            .after_render(move |_| counter.set(counter.get() + 1)),
    );
    assert_eq!(renders.get(), 1);

    component.set_attribute("data-trace", "on");
    assert_eq!(renders.get(), 1);
    assert_eq!(component.attribute("data-trace").as_deref(), Some("on"));
}

#[test]
fn style_wraps_the_rendered_body() {
    let component = connect(
        ComponentSpec::new("x-styled")
            .template("<p>hi</p>")
            .style("p { margin: 0; }"),
    );
    assert_eq!(component.markup(), "<style>p { margin: 0; }</style>\n<p>hi</p>");
}

struct TracePlugin {
    label: &'static str,
    trace: Rc<RefCell<Vec<String>>>,
}

impl Plugin for TracePlugin {
    fn before_render(&self, _component: &Component) {
        self.trace.borrow_mut().push(format!("{}:before", self.label));
    }

    fn after_render(&self, _component: &Component) {
        self.trace.borrow_mut().push(format!("{}:after", self.label));
    }

    fn transform_template(&self, template: String, _data: &Value, _component: &Component) -> String {
        format!("{}[{}]", template, self.label)
    }
}

fn trace_plugin(label: &'static str, trace: Rc<RefCell<Vec<String>>>) -> PluginInit {
    Rc::new(move |_component: &Component| {
        Box::new(TracePlugin {
            label,
            trace: Rc::clone(&trace),
        })
    })
}

#[test]
fn plugins_hook_and_transform_in_registration_order() {
    let trace = Rc::new(RefCell::new(Vec::new()));

    let component = connect(
        ComponentSpec::new("x-traced")
            .template("base")
            .plugin(trace_plugin("a", Rc::clone(&trace)))
            .plugin(trace_plugin("b", Rc::clone(&trace))),
    );

    // Transforms chain left to right: each plugin sees its predecessor's
    // output.
    assert_eq!(component.markup(), "base[a][b]");
    assert_eq!(
        *trace.borrow(),
        vec!["a:before", "b:before", "a:after", "b:after"],
    );
}

#[test]
fn lifecycle_hooks_run_around_the_first_render() {
    let trace = Rc::new(RefCell::new(Vec::new()));

    let on_connected = Rc::clone(&trace);
    let on_disconnected = Rc::clone(&trace);
    let after_render = Rc::clone(&trace);

    let component = connect(
        ComponentSpec::new("x-lifecycle")
            .template("<p>hi</p>")
            .after_render(move |_| after_render.borrow_mut().push("after_render"))
            .on_connected(move |component| {
                // The first render has already committed at this point.
                assert_eq!(component.markup(), "<p>hi</p>");
                on_connected.borrow_mut().push("on_connected");
            })
            .on_disconnected(move |_| on_disconnected.borrow_mut().push("on_disconnected")),
    );

    component.disconnected_callback();
    assert!(!component.is_connected());
    assert_eq!(
        *trace.borrow(),
        vec!["after_render", "on_connected", "on_disconnected"],
    );
}

#[test]
fn event_directives_invoke_methods() {
    let component = connect(
        ComponentSpec::new("x-clicker")
            .state("count", json!(0))
            .template(r#"<p>{{ count }}</p><button @click="inc">+</button>"#)
            .method("inc", |_event, component| {
                let count = component
                    .get_state("count")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(0);
                component.set_state_entry("count", count + 1);
            }),
    );
    assert!(component.markup().contains("<p>0</p>"));

    component.query_by_attribute("@click")[0].click();
    assert!(component.markup().contains("<p>1</p>"));

    // The rewired listener on the fresh markup still works.
    component.query_by_attribute("@click")[0].click();
    assert!(component.markup().contains("<p>2</p>"));
}

#[test]
fn unknown_method_directive_is_skipped_not_fatal() {
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);

    let component = connect(
        ComponentSpec::new("x-partial")
            .template(
                r#"<button id="bad" @click="ghost">?</button><button id="good" @click="hit">!</button>"#,
            )
            .method("hit", move |_event, _component| {
                counter.set(counter.get() + 1);
            }),
    );

    let buttons = component.query_by_attribute("id");
    let bad = buttons.iter().find(|b| b.attribute("id").as_deref() == Some("bad")).unwrap();
    let good = buttons.iter().find(|b| b.attribute("id").as_deref() == Some("good")).unwrap();

    bad.click();
    good.click();
    assert_eq!(hits.get(), 1);
}

#[test]
fn methods_receive_the_event_value() {
    let seen = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&seen);

    let component = connect(
        ComponentSpec::new("x-echo")
            .template(r#"<input id="field" @change="record">"#)
            .method("record", move |event, _component| {
                *slot.borrow_mut() = event.value().map(str::to_string);
            }),
    );

    let field = &component.query_by_attribute("id")[0];
    field.set_value("typed");
    field.dispatch(&tagforge::Event::new("change"));
    assert_eq!(seen.borrow().as_deref(), Some("typed"));
}

#[test]
fn set_state_merges_shallowly() {
    let component = connect(
        ComponentSpec::new("x-merge")
            .state("a", json!(1))
            .state("b", json!(2))
            .template("{{ a }}-{{ b }}"),
    );

    let mut patch = Map::new();
    patch.insert("b".into(), json!(20));
    patch.insert("c".into(), json!(30));
    component.set_state(patch);

    assert_eq!(component.get_state("a"), Some(json!(1)));
    assert_eq!(component.get_state("b"), Some(json!(20)));
    assert_eq!(component.get_state("c"), Some(json!(30)));
}

#[test]
fn boolean_prop_defaults_become_presence_attributes() {
    let component = connect(
        ComponentSpec::new("x-flag")
            .prop("open", PropSpec::new(PropType::Boolean).default(json!(true)).reflect())
            .template("{{#if open}}yes{{/if}}"),
    );
    assert_eq!(component.attribute("open").as_deref(), Some(""));
    assert_eq!(component.markup(), "yes");

    component.set_prop("open", &json!(false));
    assert_eq!(component.attribute("open"), None);
    assert_eq!(component.markup(), "");
}
