//! Value-transforming pipes in template placeholders.
//!
//! The pipe plugin extends placeholder syntax with
//! `{{ path | pipeName:arg1:arg2 }}`, resolved during the plugin's
//! `transform_template` pass - before the template engine runs, so the
//! engine only ever sees the substituted text. Arguments are positional
//! strings; surrounding single or double quotes are stripped.
//!
//! Pipe failures never abort a render: an unknown pipe name or an erroring
//! pipe function logs a warning and passes the raw value through.

use std::collections::HashMap;
use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use thiserror::Error;

use tagforge_template::{resolve, textualize};

use crate::element::Component;
use crate::plugin::{Plugin, PluginInit};
use crate::plugins::pipe_defaults::default_pipes;

/// Error returned by a pipe function. Always recoverable: the pipe step
/// logs it and substitutes the untransformed value.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct PipeError(String);

impl PipeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A pipe: transforms a resolved value given string-typed positional
/// arguments.
pub type PipeFn = Rc<dyn Fn(&Value, &[String]) -> Result<Value, PipeError>>;

static PIPE_EXPR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([^{}\s|]+)\s*\|\s*([^\s:}|]+)(:[^}]+)?\s*\}\}").unwrap()
});

struct PipePlugin {
    pipes: HashMap<String, PipeFn>,
}

impl PipePlugin {
    fn apply(&self, path: &str, name: &str, raw_args: &str, data: &Value) -> String {
        let value = resolve(path, data)
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        let args = parse_args(raw_args);

        match self.pipes.get(name) {
            Some(pipe) => match pipe(&value, &args) {
                Ok(transformed) => textualize(&transformed),
                Err(err) => {
                    log::warn!("error applying pipe \"{}\" on \"{}\": {}", name, path, err);
                    textualize(&value)
                }
            },
            None => {
                log::warn!("pipe \"{}\" is not defined", name);
                textualize(&value)
            }
        }
    }
}

impl Plugin for PipePlugin {
    fn transform_template(
        &self,
        template: String,
        data: &Value,
        _component: &Component,
    ) -> String {
        PIPE_EXPR
            .replace_all(&template, |caps: &Captures| {
                let raw_args = caps.get(3).map(|m| m.as_str()).unwrap_or("");
                self.apply(&caps[1], &caps[2], raw_args, data)
            })
            .into_owned()
    }
}

/// Splits `:arg1:arg2` into positional arguments, trimming whitespace and
/// one layer of surrounding quotes.
fn parse_args(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw[1..]
        .split(':')
        .map(|arg| {
            let arg = arg.trim();
            let arg = arg.strip_prefix(&['\'', '"'][..]).unwrap_or(arg);
            let arg = arg.strip_suffix(&['\'', '"'][..]).unwrap_or(arg);
            arg.to_string()
        })
        .collect()
}

/// The pipe plugin with the default pipe set (`uppercase`, `lowercase`,
/// `titlecase`, `currency`, `json`).
pub fn pipe_plugin() -> PluginInit {
    pipe_plugin_with(HashMap::new())
}

/// The pipe plugin with additional pipes merged over the defaults. A
/// custom pipe under a default's name replaces it.
pub fn pipe_plugin_with(additional: HashMap<String, PipeFn>) -> PluginInit {
    let mut pipes = default_pipes();
    pipes.extend(additional);
    let pipes = Rc::new(pipes);
    Rc::new(move |_component: &Component| {
        Box::new(PipePlugin {
            pipes: (*pipes).clone(),
        })
    })
}
