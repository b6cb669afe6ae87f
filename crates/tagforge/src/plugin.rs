//! The plugin hook protocol.
//!
//! A plugin extends the per-instance lifecycle. It registers on a component
//! definition as a [`PluginInit`] - a function invoked once per instance at
//! construction, returning the instance's hook object. Hook objects are
//! never shared across instances, and hooks of the same kind always fire in
//! plugin-registration order.
//!
//! Hooks take `&self` because several of them (`on_connected`, watchers
//! reached through `transform_template`-triggered state changes) may
//! re-enter the render core via [`Component::set_state`]; plugins that need
//! mutable state keep it behind a `Cell`/`RefCell` of their own.
//!
//! [`Component::set_state`]: crate::Component::set_state

use std::rc::Rc;

use serde_json::Value;

use crate::element::Component;

/// Per-instance lifecycle hooks.
///
/// Every hook has a no-op default, so plugin authors implement only what
/// they need while the render core calls every hook unconditionally.
pub trait Plugin {
    /// Fired after the instance's first render, when it joins the tree.
    fn on_connected(&self, _component: &Component) {}

    /// Fired when the host detaches the instance.
    fn on_disconnected(&self, _component: &Component) {}

    /// Fired at the start of every render pass.
    fn before_render(&self, _component: &Component) {}

    /// Fired at the end of every render pass, after markup is committed and
    /// bindings rewired.
    fn after_render(&self, _component: &Component) {}

    /// Transforms the template before the template engine runs. Each
    /// plugin receives the output of the previous one; the default is the
    /// identity.
    fn transform_template(
        &self,
        template: String,
        _data: &Value,
        _component: &Component,
    ) -> String {
        template
    }
}

/// A plugin initializer: invoked once per component instance at
/// construction, returns the instance's hook object.
pub type PluginInit = Rc<dyn Fn(&Component) -> Box<dyn Plugin>>;
