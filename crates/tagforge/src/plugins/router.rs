//! Client-side routing plugin.
//!
//! Routes map path patterns to view identifiers. Patterns support `:param`
//! segments (captured into the match's parameter map) and the `*` wildcard.
//! On every location change the plugin matches the current path and pushes
//! the result into component state as `current_path`, `current_view` and
//! `route_params`, and reflects the path in the `active-route` attribute.
//!
//! The browser history surface is consumed through [`MemoryHistory`], an
//! in-memory collaborator with the same shape (current path, push,
//! change notification). A [`Navigator`] handle for programmatic
//! navigation is attached to the component's extensions.
//!
//! # Example
//!
//! ```rust
//! use tagforge::plugins::router::{RouteDef, RouteTable};
//!
//! let table = RouteTable::compile(&[
//!     RouteDef::new("/", "<home-view>"),
//!     RouteDef::new("/users/:id", "<users-view>"),
//!     RouteDef::new("*", "<not-found-view>"),
//! ]);
//!
//! let matched = table.matches("/users/42").unwrap();
//! assert_eq!(matched.view, "<users-view>");
//! assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::element::Component;
use crate::plugin::{Plugin, PluginInit};

static PARAM_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r":([A-Za-z0-9_]+)").unwrap());

/// One route definition: a path pattern and the view it selects.
#[derive(Debug, Clone)]
pub struct RouteDef {
    pattern: String,
    view: String,
}

impl RouteDef {
    pub fn new(pattern: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            view: view.into(),
        }
    }
}

/// The result of matching a path against a route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The matched route's view identifier.
    pub view: String,
    /// Captured `:param` values, empty for literal and wildcard routes.
    pub params: BTreeMap<String, String>,
    /// The pattern of the route that matched.
    pub pattern: String,
}

struct CompiledRoute {
    // None when the pattern failed to compile: such a route never matches.
    regex: Option<Regex>,
    keys: Vec<String>,
    pattern: String,
    view: String,
}

/// A set of routes compiled for matching.
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Compiles route definitions in order. Patterns are not validated:
    /// a pattern that cannot compile produces a route that never matches,
    /// falling through to a later `*` route if one exists.
    pub fn compile(defs: &[RouteDef]) -> Self {
        let routes = defs
            .iter()
            .map(|def| {
                if def.pattern == "*" {
                    return CompiledRoute {
                        regex: Regex::new(".*").ok(),
                        keys: Vec::new(),
                        pattern: def.pattern.clone(),
                        view: def.view.clone(),
                    };
                }

                let mut keys = Vec::new();
                let escaped = regex::escape(&def.pattern);
                let with_captures = PARAM_SEGMENT.replace_all(&escaped, |caps: &regex::Captures| {
                    keys.push(caps[1].to_string());
                    "([^/]+)".to_string()
                });
                CompiledRoute {
                    regex: Regex::new(&format!("^{}$", with_captures)).ok(),
                    keys,
                    pattern: def.pattern.clone(),
                    view: def.view.clone(),
                }
            })
            .collect();
        Self { routes }
    }

    /// Matches a path against the table, first route wins.
    pub fn matches(&self, path: &str) -> Option<RouteMatch> {
        for route in &self.routes {
            let Some(regex) = &route.regex else {
                continue;
            };
            if let Some(caps) = regex.captures(path) {
                let mut params = BTreeMap::new();
                for (index, key) in route.keys.iter().enumerate() {
                    if let Some(m) = caps.get(index + 1) {
                        params.insert(key.clone(), m.as_str().to_string());
                    }
                }
                return Some(RouteMatch {
                    view: route.view.clone(),
                    params,
                    pattern: route.pattern.clone(),
                });
            }
        }
        None
    }
}

type HistoryListener = Rc<dyn Fn(&str)>;

struct HistoryInner {
    path: String,
    next_id: u64,
    listeners: Vec<(u64, HistoryListener)>,
}

/// In-memory stand-in for the host's history/location surface: a current
/// path, a push primitive, and change notification.
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Rc<RefCell<HistoryInner>>,
}

impl MemoryHistory {
    /// Creates a history positioned at `/`.
    pub fn new() -> Self {
        Self::with_path("/")
    }

    /// Creates a history positioned at the given path.
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HistoryInner {
                path: path.into(),
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// The current path.
    pub fn path(&self) -> String {
        self.inner.borrow().path.clone()
    }

    /// Moves to a new path and notifies subscribers in subscription order.
    pub fn push(&self, path: &str) {
        let listeners: Vec<HistoryListener> = {
            let mut inner = self.inner.borrow_mut();
            inner.path = path.to_string();
            inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };
        for listener in listeners {
            listener(path);
        }
    }

    fn subscribe(&self, listener: impl Fn(&str) + 'static) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    fn unsubscribe(&self, id: u64) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(listener_id, _)| *listener_id != id);
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryHistory")
            .field("path", &inner.path)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Programmatic navigation handle, attached to the component's extensions
/// by the router plugin.
#[derive(Clone)]
pub struct Navigator {
    history: MemoryHistory,
}

impl Navigator {
    /// Pushes a new path; the router observes the change and updates state.
    pub fn navigate_to(&self, path: &str) {
        self.history.push(path);
    }
}

struct RouterPlugin {
    table: Rc<RouteTable>,
    history: MemoryHistory,
    subscription: Cell<Option<u64>>,
}

impl RouterPlugin {
    fn apply_route(table: &RouteTable, component: &Component, path: &str) {
        let mut patch = Map::new();
        patch.insert("current_path".into(), Value::String(path.to_string()));
        match table.matches(path) {
            Some(matched) => {
                patch.insert("current_view".into(), Value::String(matched.view));
                let params: Map<String, Value> = matched
                    .params
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect();
                patch.insert("route_params".into(), Value::Object(params));
            }
            None => {
                patch.insert("current_view".into(), Value::String("NotFound".into()));
                patch.insert("route_params".into(), Value::Object(Map::new()));
            }
        }
        component.set_state(patch);
        component.set_attribute("active-route", path);
    }
}

impl Plugin for RouterPlugin {
    fn on_connected(&self, component: &Component) {
        let weak = component.downgrade();
        let table = Rc::clone(&self.table);
        let id = self.history.subscribe(move |path| {
            if let Some(component) = weak.upgrade() {
                RouterPlugin::apply_route(&table, &component, path);
            }
        });
        self.subscription.set(Some(id));

        // Initial route check against wherever the history already is.
        RouterPlugin::apply_route(&self.table, component, &self.history.path());
    }

    fn on_disconnected(&self, _component: &Component) {
        if let Some(id) = self.subscription.take() {
            self.history.unsubscribe(id);
        }
    }
}

/// Creates the router plugin over the given routes and history surface.
///
/// Each instance subscribes to the history on connect and unsubscribes on
/// disconnect. A [`Navigator`] is inserted into the instance's extensions
/// at construction.
pub fn router_plugin(routes: Vec<RouteDef>, history: MemoryHistory) -> PluginInit {
    let table = Rc::new(RouteTable::compile(&routes));
    Rc::new(move |component: &Component| {
        component.insert_extension(Navigator {
            history: history.clone(),
        });
        Box::new(RouterPlugin {
            table: Rc::clone(&table),
            history: history.clone(),
            subscription: Cell::new(None),
        })
    })
}
