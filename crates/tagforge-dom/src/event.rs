//! Synthetic events delivered to element listeners.

/// An event delivered to listeners registered on an [`ElementHandle`].
///
/// Carries the event name and, for value-bearing events like `input` and
/// `blur`, the element's displayed value at delivery time. When the sender
/// did not set a value, [`ElementHandle::dispatch`] stamps the event with
/// the element's current value - the headless equivalent of a handler
/// reading `target.value`.
///
/// [`ElementHandle`]: crate::ElementHandle
/// [`ElementHandle::dispatch`]: crate::ElementHandle::dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    value: Option<String>,
}

impl Event {
    /// Creates an event with no value of its own; the dispatching element
    /// stamps its displayed value on delivery.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Creates an event carrying an explicit value.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// The event name, e.g. `"input"`, `"blur"`, `"click"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value associated with the event, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub(crate) fn stamped_with(&self, fallback: &str) -> Self {
        Self {
            name: self.name.clone(),
            value: self.value.clone().or_else(|| Some(fallback.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamping_only_fills_missing_values() {
        let bare = Event::new("input");
        assert_eq!(bare.stamped_with("abc").value(), Some("abc"));

        let explicit = Event::with_value("input", "typed");
        assert_eq!(explicit.stamped_with("abc").value(), Some("typed"));
    }
}
