//! Render logging through the `log` facade.

use std::rc::Rc;

use serde_json::Value;

use crate::element::Component;
use crate::plugin::{Plugin, PluginInit};

struct LoggerPlugin;

impl Plugin for LoggerPlugin {
    fn after_render(&self, component: &Component) {
        log::debug!(
            "<{}> rendered with data: {}",
            component.tag(),
            Value::Object(component.rendered_data()),
        );
    }
}

/// Logs plugin attachment at `info` and every completed render at `debug`,
/// with the data object the render saw.
pub fn logger_plugin() -> PluginInit {
    Rc::new(|component: &Component| {
        log::info!("plugin attached to <{}>", component.tag());
        Box::new(LoggerPlugin)
    })
}
