//! Prop schema: typed views over the string-keyed attribute store.
//!
//! Attributes are strings; props give them types. Instead of generating
//! accessors at runtime, each prop type carries a pure [`decode`] /
//! [`encode`] codec pair, and the component reads props through it on every
//! render (prop values are derived, never cached).
//!
//! [`decode`]: PropType::decode
//! [`encode`]: PropType::encode

use serde_json::Value;

use tagforge_template::{textualize, truthy};

/// The type an attribute string decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropType {
    String,
    Number,
    Boolean,
}

impl PropType {
    /// Decodes a raw attribute value into a typed value.
    ///
    /// An absent attribute decodes to `false` for booleans and `null`
    /// otherwise. A present boolean attribute is `true` unless its value is
    /// the literal string `"false"`. Numbers that fail to parse decode to
    /// `null`.
    pub fn decode(self, raw: Option<&str>) -> Value {
        match (self, raw) {
            (PropType::Boolean, None) => Value::Bool(false),
            (_, None) => Value::Null,
            (PropType::Boolean, Some(raw)) => Value::Bool(raw != "false"),
            (PropType::String, Some(raw)) => Value::String(raw.to_string()),
            (PropType::Number, Some(raw)) => {
                let raw = raw.trim();
                if let Ok(n) = raw.parse::<i64>() {
                    Value::Number(n.into())
                } else {
                    raw.parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(Value::Number)
                        .unwrap_or(Value::Null)
                }
            }
        }
    }

    /// Encodes a typed value back into an attribute write.
    ///
    /// `Some(text)` sets the attribute, `None` removes it. Truthy booleans
    /// encode as a presence attribute (empty string), falsy ones as
    /// removal.
    pub fn encode(self, value: &Value) -> Option<String> {
        match self {
            PropType::Boolean => truthy(value).then(String::new),
            PropType::String | PropType::Number => Some(textualize(value)),
        }
    }
}

/// One entry in a component's prop schema.
#[derive(Debug, Clone)]
pub struct PropSpec {
    pub(crate) prop_type: PropType,
    pub(crate) default: Option<Value>,
    pub(crate) reflect: bool,
}

impl PropSpec {
    /// Creates a prop of the given type, with no default, not reflected.
    pub fn new(prop_type: PropType) -> Self {
        Self {
            prop_type,
            default: None,
            reflect: false,
        }
    }

    /// Sets the default value, applied as an attribute at construction when
    /// the attribute is not already present.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the prop as reflected: its attribute is observed, and
    /// attribute changes re-render the component.
    pub fn reflect(mut self) -> Self {
        self.reflect = true;
        self
    }

    /// The prop's type.
    pub fn prop_type(&self) -> PropType {
        self.prop_type
    }

    /// Whether the prop reflects to an observed attribute.
    pub fn is_reflected(&self) -> bool {
        self.reflect
    }
}
