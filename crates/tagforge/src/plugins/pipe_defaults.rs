//! The default pipe set.

use std::collections::HashMap;
use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

use tagforge_template::textualize;

use crate::plugins::pipe::{PipeError, PipeFn};

// JSON token classes for the `json` pipe's highlighting: strings (keys
// when followed by a colon), the literals, and numbers.
static JSON_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#""(\\u[a-zA-Z0-9]{4}|\\[^u]|[^\\"])*"(\s*:)?|\b(?:true|false|null)\b|-?\d+(?:\.\d*)?(?:[eE][+-]?\d+)?"#,
    )
    .unwrap()
});

pub(crate) fn default_pipes() -> HashMap<String, PipeFn> {
    let mut pipes: HashMap<String, PipeFn> = HashMap::new();

    pipes.insert(
        "uppercase".into(),
        Rc::new(|value, _args| Ok(Value::String(textualize(value).to_uppercase()))),
    );

    pipes.insert(
        "lowercase".into(),
        Rc::new(|value, _args| Ok(Value::String(textualize(value).to_lowercase()))),
    );

    pipes.insert(
        "titlecase".into(),
        Rc::new(|value, _args| Ok(Value::String(title_case(&textualize(value))))),
    );

    // currency:symbol:show_symbol - two fraction digits, grouped thousands.
    // Non-numeric input passes through untouched.
    pipes.insert(
        "currency".into(),
        Rc::new(|value, args| {
            let raw = textualize(value);
            let Ok(amount) = raw.trim().parse::<f64>() else {
                return Ok(value.clone());
            };
            let symbol = args.first().map(String::as_str).unwrap_or("USD");
            let show_symbol = args.get(1).map(String::as_str) == Some("true");
            let formatted = format_grouped(amount);
            Ok(Value::String(if show_symbol {
                format!("{} {}", symbol, formatted)
            } else {
                formatted
            }))
        }),
    );

    // json:spacing - pretty-printed JSON with span-wrapped tokens for
    // class-based highlighting.
    pipes.insert(
        "json".into(),
        Rc::new(|value, args| {
            let spacing = args
                .first()
                .and_then(|arg| arg.parse::<usize>().ok())
                .unwrap_or(4);
            Ok(Value::String(highlight_json(value, spacing)?))
        }),
    );

    pipes
}

fn title_case(text: &str) -> String {
    text.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats with grouped thousands and exactly two fraction digits.
fn format_grouped(amount: f64) -> String {
    let text = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, "00"));

    let mut grouped = String::new();
    let digits = int_part.len();
    for (index, ch) in int_part.chars().enumerate() {
        if index > 0 && (digits - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

fn highlight_json(value: &Value, spacing: usize) -> Result<String, PipeError> {
    let indent = " ".repeat(spacing);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|err| PipeError::new(err.to_string()))?;
    let pretty = String::from_utf8(buf).map_err(|err| PipeError::new(err.to_string()))?;

    Ok(JSON_TOKEN
        .replace_all(&pretty, |caps: &Captures| {
            let token = &caps[0];
            let class = if token.starts_with('"') {
                if token.trim_end().ends_with(':') {
                    "key"
                } else {
                    "string"
                }
            } else if token == "true" || token == "false" {
                "boolean"
            } else if token == "null" {
                "null"
            } else {
                "number"
            };
            format!("<span class=\"{}\">{}</span>", class, token)
        })
        .into_owned())
}
